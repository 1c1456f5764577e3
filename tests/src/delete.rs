use futures::executor::block_on;
use sone_client::{
    api::{PostId, ReplyId, Request, Target, KEY_CONFIRM_DELETE_POST, KEY_CONFIRM_DELETE_REPLY},
    DeletePhase,
};

use crate::harness::*;

fn env_with_content() -> Env {
    let env = Env::new();
    {
        let mut s = env.server.server();
        s.add_translation(KEY_CONFIRM_DELETE_POST, "Yes, delete the post!");
        s.add_translation(KEY_CONFIRM_DELETE_REPLY, "Yes, delete the reply!");
        s.add_post(PostId(String::from("p1")), sone("alice"));
        s.add_reply(ReplyId(String::from("r1")), sone("alice"));
        s.login(Some(sone("alice")));
    }
    env
}

fn phase(env: &Env, target: &Target) -> DeletePhase {
    env.ctrl.delete_view(target).expect("delete view").phase
}

fn removed(env: &Env) -> bool {
    env.page
        .rendered
        .borrow()
        .iter()
        .any(|r| matches!(r, Rendered::Removed(_)))
}

#[test]
fn label_comes_from_translation() {
    let env = env_with_content();
    let p1 = Target::post("p1");
    let r1 = Target::reply("r1");
    assert!(!env.ctrl.delete_clicked(&p1), "clickable before the label is known");
    assert_eq!(
        block_on(env.ctrl.prepare_delete(p1.clone())).unwrap(),
        "Yes, delete the post!"
    );
    assert_eq!(
        block_on(env.ctrl.prepare_delete(r1.clone())).unwrap(),
        "Yes, delete the reply!"
    );
    assert_eq!(phase(&env, &p1), DeletePhase::Prompt);
    assert_eq!(
        env.server.server().calls()[0],
        Request::GetTranslation {
            key: String::from(KEY_CONFIRM_DELETE_POST)
        }
    );
}

#[test]
fn click_only_asks_for_confirmation() {
    let env = env_with_content();
    let p1 = Target::post("p1");
    block_on(env.ctrl.prepare_delete(p1.clone())).unwrap();

    assert!(env.ctrl.delete_clicked(&p1));
    assert_eq!(phase(&env, &p1), DeletePhase::Confirm);
    assert!(env.ctrl.delete_view(&p1).unwrap().dismissal.is_armed());
    assert!(!removed(&env));
    assert!(env.server.server().exists(&p1));

    // clicking elsewhere goes back to the delete button, once
    assert!(env.ctrl.outside_clicked(&p1));
    assert_eq!(phase(&env, &p1), DeletePhase::Prompt);
    assert!(!env.ctrl.outside_clicked(&p1));

    // confirming from the prompt does nothing
    assert!(!block_on(env.ctrl.confirm_clicked(&p1)).unwrap());
    assert!(env.server.server().exists(&p1));
    assert!(!env
        .server
        .server()
        .calls()
        .iter()
        .any(|c| matches!(c, Request::Delete { .. })));
}

#[test]
fn confirmed_deletion_removes() {
    let env = env_with_content();
    let r1 = Target::reply("r1");
    block_on(env.ctrl.prepare_delete(r1.clone())).unwrap();
    env.ctrl.delete_clicked(&r1);
    assert!(block_on(env.ctrl.confirm_clicked(&r1)).unwrap());

    assert_eq!(phase(&env, &r1), DeletePhase::Removed);
    assert_eq!(env.page.last(), Some(Rendered::Removed(r1.clone())));
    assert!(!env.server.server().exists(&r1));
    assert!(!env.ctrl.delete_view(&r1).unwrap().dismissal.is_armed());
    assert!(!env.ctrl.outside_clicked(&r1));
}

#[test]
fn refused_deletion_alerts_and_keeps() {
    let cases = [
        (Some("alice"), Target::post("p2"), "Invalid post ID given!"),
        (Some("alice"), Target::reply("r2"), "Invalid reply ID given!"),
        (None, Target::post("p1"), "You need to be logged in."),
        (
            Some("bob"),
            Target::post("p1"),
            "You are not allowed to delete this post.",
        ),
    ];
    for (user, target, message) in cases {
        let env = env_with_content();
        env.server.server().login(user.map(sone));
        block_on(env.ctrl.prepare_delete(target.clone())).unwrap();
        env.ctrl.delete_clicked(&target);
        assert!(!block_on(env.ctrl.confirm_clicked(&target)).unwrap());

        let rendered = env.page.take();
        assert!(rendered.contains(&Rendered::Alert(String::from(message))));
        assert!(!rendered.iter().any(|r| matches!(r, Rendered::Removed(_))));
        assert_eq!(phase(&env, &target), DeletePhase::Prompt);
    }

    let env = env_with_content();
    env.server.server().login(Some(sone("bob")));
    let r1 = Target::reply("r1");
    block_on(env.ctrl.prepare_delete(r1.clone())).unwrap();
    env.ctrl.delete_clicked(&r1);
    block_on(env.ctrl.confirm_clicked(&r1)).unwrap();
    assert_eq!(
        env.page.take().last(),
        Some(&Rendered::Alert(String::from(
            "You are not allowed to delete this reply."
        )))
    );
    assert!(env.server.server().exists(&r1));
}

#[test]
fn transport_failure_goes_back_to_prompt() {
    let env = env_with_content();
    let p1 = Target::post("p1");
    block_on(env.ctrl.prepare_delete(p1.clone())).unwrap();
    env.ctrl.delete_clicked(&p1);
    *env.page.form_password.borrow_mut() = Some(sone_client::api::FormPassword(String::from(
        "stale",
    )));
    assert!(block_on(env.ctrl.confirm_clicked(&p1)).is_err());
    assert_eq!(phase(&env, &p1), DeletePhase::Prompt);
    assert!(!removed(&env));
    assert!(env.server.server().exists(&p1));
}

#[test]
fn unexplained_refusal_alerts_generic_message() {
    for (code, message) in [
        (None, "Deletion failed."),
        (Some("disk-full"), "Deletion failed: disk-full"),
    ] {
        let env = env_with_content();
        env.server.server().refuse_deletes(code);
        let p1 = Target::post("p1");
        block_on(env.ctrl.prepare_delete(p1.clone())).unwrap();
        env.ctrl.delete_clicked(&p1);
        assert!(!block_on(env.ctrl.confirm_clicked(&p1)).unwrap());

        assert_eq!(env.page.last(), Some(Rendered::Alert(String::from(message))));
        assert!(!removed(&env));
        assert_eq!(phase(&env, &p1), DeletePhase::Prompt);
        assert!(env.server.server().exists(&p1));
    }
}
