use futures::executor::block_on;
use sone_client::{
    api::{FormPassword, PostId, ReplyId, Request, Target},
    LikeView,
};

use crate::harness::*;

fn env_with_post() -> Env {
    let env = Env::new();
    {
        let mut s = env.server.server();
        s.add_post(PostId(String::from("p42")), sone("alice"));
        s.add_reply(ReplyId(String::from("r1")), sone("alice"));
        s.add_liker(&Target::post("p42"), sone("carol"));
        s.add_liker(&Target::post("p42"), sone("dave"));
        s.login(Some(sone("bob")));
    }
    env
}

fn form_password() -> FormPassword {
    FormPassword(String::from(FORM_PASSWORD))
}

#[test]
fn like_then_refresh_count() {
    let env = env_with_post();
    let p42 = Target::post("p42");
    block_on(env.ctrl.like(p42.clone())).expect("liking p42");

    assert_eq!(
        env.server.server().calls(),
        &[
            Request::Like {
                target: p42.clone(),
                form_password: form_password(),
            },
            Request::GetLikes {
                target: p42.clone()
            },
        ]
    );
    assert_eq!(
        env.page.take(),
        vec![
            Rendered::Likes(
                p42.clone(),
                LikeView {
                    liked: Some(true),
                    likes: None,
                }
            ),
            Rendered::Likes(
                p42.clone(),
                LikeView {
                    liked: Some(true),
                    likes: Some(3),
                }
            ),
        ]
    );
    let v = env.ctrl.like_view(&p42).unwrap();
    assert_eq!(v.like_hidden(), Some(true));
    assert_eq!(v.unlike_hidden(), Some(false));
    assert_eq!(v.likes_hidden(), Some(false));
}

#[test]
fn unlike_down_to_zero_hides_count() {
    let env = env_with_post();
    let r1 = Target::reply("r1");
    block_on(env.ctrl.like(r1.clone())).expect("liking r1");
    assert_eq!(env.ctrl.like_view(&r1).unwrap().likes, Some(1));

    block_on(env.ctrl.unlike(r1.clone())).expect("unliking r1");
    let v = env.ctrl.like_view(&r1).unwrap();
    assert_eq!(v.like_hidden(), Some(false));
    assert_eq!(v.unlike_hidden(), Some(true));
    assert_eq!(v.likes, Some(0));
    assert_eq!(v.likes_hidden(), Some(true));
}

#[test]
fn failed_like_changes_nothing() {
    let env = env_with_post();
    let p42 = Target::post("p42");
    *env.page.form_password.borrow_mut() = Some(FormPassword(String::from("stale")));
    assert!(block_on(env.ctrl.like(p42.clone())).is_err());
    assert_eq!(env.page.take(), vec![]);
    assert_eq!(env.ctrl.like_view(&p42), None);
    assert!(
        !env.server
            .server()
            .calls()
            .iter()
            .any(|c| matches!(c, Request::GetLikes { .. })),
        "count fetched after a failed like"
    );
    assert_eq!(env.server.server().num_likes(&p42), Some(2));
}

#[test]
fn no_form_password_no_request() {
    let env = env_with_post();
    *env.page.form_password.borrow_mut() = None;
    assert!(block_on(env.ctrl.unlike(Target::post("p42"))).is_err());
    assert!(env.server.server().calls().is_empty());
}

#[test]
fn unsuccessful_count_keeps_previous() {
    let env = env_with_post();
    let gone = Target::post("gone");
    block_on(env.ctrl.like(gone.clone())).expect("liking unknown post");
    assert_eq!(
        env.ctrl.like_view(&gone),
        Some(LikeView {
            liked: Some(true),
            likes: None,
        })
    );
    assert_eq!(block_on(env.ctrl.refresh_likes(&gone)).unwrap(), None);
}
