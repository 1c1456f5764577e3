use futures::executor::block_on;
use sone_client::{api::Request, SwapConfig, SwapState};

use crate::harness::*;

const KEY: &str = "View.CreatePost.Text";

fn config(optional: bool) -> SwapConfig {
    SwapConfig {
        default_text_key: String::from(KEY),
        field_name: String::from("text"),
        optional,
        use_textarea: true,
    }
}

fn env() -> Env {
    let env = Env::new();
    env.server
        .server()
        .add_translation(KEY, "Write something here");
    env
}

fn translations_fetched(env: &Env) -> usize {
    env.server
        .server()
        .calls()
        .iter()
        .filter(|c| matches!(c, Request::GetTranslation { .. }))
        .count()
}

#[test]
fn empty_field_shows_default_text() {
    let env = env();
    let id = env.ctrl.allocate_swap();
    assert_ne!(id, env.ctrl.allocate_swap());
    block_on(env.ctrl.init_swap(id, config(false), String::new())).unwrap();

    let rendered = env.page.take();
    assert_eq!(rendered.len(), 2);
    match &rendered[..] {
        [Rendered::Swap(a, first, false), Rendered::Swap(b, second, false)] => {
            assert_eq!((*a, *b), (id, id));
            assert_eq!(first.state, SwapState::SimpleVisible);
            assert_eq!(first.simple_value(), None);
            assert_eq!(second.simple_value(), Some("Write something here"));
            assert!(second.rich_hidden());
        }
        r => panic!("unexpected renders {r:?}"),
    }
}

#[test]
fn prefilled_field_shows_rich_control() {
    let env = env();
    let id = env.ctrl.allocate_swap();
    block_on(env.ctrl.init_swap(id, config(false), String::from("draft"))).unwrap();
    let v = env.ctrl.swap_view(id).unwrap();
    assert_eq!(v.state, SwapState::RichVisible);
    assert_eq!(v.value, "draft");
    assert!(v.simple_disabled());
    assert_eq!(translations_fetched(&env), 0);
    assert!(env.ctrl.swap_submitted(id, String::from("draft")));
}

#[test]
fn focus_blur_round_trip() {
    let env = env();
    let id = env.ctrl.allocate_swap();
    block_on(env.ctrl.init_swap(id, config(false), String::new())).unwrap();
    env.page.take();

    env.ctrl.swap_focused(id);
    match env.page.take().as_slice() {
        [Rendered::Swap(_, v, true)] => {
            assert_eq!(v.state, SwapState::RichVisible);
            assert!(v.simple_hidden() && v.simple_disabled());
        }
        r => panic!("unexpected renders {r:?}"),
    }

    block_on(env.ctrl.swap_blurred(id, String::from("typed"))).unwrap();
    assert_eq!(env.page.take(), vec![], "non-empty rich control stays");

    block_on(env.ctrl.swap_blurred(id, String::new())).unwrap();
    let v = env.ctrl.swap_view(id).unwrap();
    assert_eq!(v.state, SwapState::SimpleVisible);
    assert_eq!(v.simple_value(), Some("Write something here"));
    assert_eq!(translations_fetched(&env), 2, "default text requested again");
}

#[test]
fn submission_guard() {
    let env = env();
    let required = env.ctrl.allocate_swap();
    let optional = env.ctrl.allocate_swap();
    block_on(env.ctrl.init_swap(required, config(false), String::new())).unwrap();
    block_on(env.ctrl.init_swap(optional, config(true), String::new())).unwrap();

    assert!(!env.ctrl.swap_submitted(required, String::new()));
    assert!(env.ctrl.swap_submitted(required, String::from("hello")));
    assert!(env.ctrl.swap_submitted(optional, String::new()));
    assert!(env.ctrl.swap_submitted(optional, String::from("hello")));
}
