use std::{future::Future, task::Context, time::Duration};

use futures::{executor::LocalPool, task::LocalSpawnExt};
use sone_client::{
    api::{Request, Status},
    Backend, PollConfig, Poller, Sleeper, StatusView,
};

use crate::harness::*;

fn spawn_watch(pool: &LocalPool, env: &Env, id: &str) -> bool {
    match env.ctrl.watch(sone(id)) {
        Some(fut) => {
            pool.spawner()
                .spawn_local(fut)
                .expect("spawning polling loop");
            true
        }
        None => false,
    }
}

fn status_fetches(env: &Env) -> usize {
    env.server
        .server()
        .calls()
        .iter()
        .filter(|c| matches!(c, Request::GetSoneStatus { .. }))
        .count()
}

#[test]
fn watching_twice_polls_once() {
    let mut pool = LocalPool::new();
    let env = Env::new();
    env.server.server().set_sone(sone("a"), Status::Idle, false);

    assert!(spawn_watch(&pool, &env, "a"));
    assert!(!spawn_watch(&pool, &env, "a"));
    assert!(env.ctrl.is_watched(&sone("a")));
    pool.run_until_stalled();
    assert_eq!(env.clock.sleeping(), vec![Duration::from_secs(5)]);

    env.clock.wake_next();
    pool.run_until_stalled();
    assert!(!spawn_watch(&pool, &env, "a"));
    pool.run_until_stalled();
    assert_eq!(env.clock.sleeping(), vec![Duration::from_secs(60)]);
    assert_eq!(status_fetches(&env), 1);
}

#[test]
fn interval_follows_status() {
    let mut pool = LocalPool::new();
    let env = Env::new();
    env.server.server().set_sone(sone("a"), Status::Idle, false);
    spawn_watch(&pool, &env, "a");
    pool.run_until_stalled();
    assert_eq!(env.page.take(), vec![], "nothing rendered before the first fetch");

    let steps = [
        (Status::Idle, false, 60),
        (Status::Idle, true, 5),
        (Status::Inserting, false, 5),
        (Status::Downloading, false, 5),
        (Status::Unknown, false, 60),
        (Status::Unknown, true, 5),
    ];
    for (status, modified, secs) in steps {
        env.server.server().set_sone(sone("a"), status, modified);
        env.clock.wake_next().expect("polling loop is not sleeping");
        pool.run_until_stalled();
        assert_eq!(env.clock.sleeping(), vec![Duration::from_secs(secs)]);
        match env.page.last() {
            Some(Rendered::Sone(v)) => {
                assert_eq!(v.id, sone("a"));
                assert_eq!(v.name, "Sone a");
                assert_eq!(v.status, status);
                assert_eq!(v.modified, modified);
            }
            r => panic!("expected sone render, got {r:?}"),
        }
    }
    assert_eq!(status_fetches(&env), steps.len());
}

#[test]
fn failed_fetch_stops_only_that_sone() {
    let mut pool = LocalPool::new();
    let env = Env::new();
    env.server.server().set_sone(sone("a"), Status::Idle, false);
    env.server.server().set_sone(sone("b"), Status::Idle, false);
    spawn_watch(&pool, &env, "a");
    spawn_watch(&pool, &env, "b");
    pool.run_until_stalled();
    env.clock.wake_next();
    env.clock.wake_next();
    pool.run_until_stalled();
    assert_eq!(env.clock.sleeping().len(), 2);

    env.server.server().remove_sone(&sone("a"));
    env.page.take();
    env.clock.wake_next();
    env.clock.wake_next();
    pool.run_until_stalled();

    assert_eq!(env.clock.sleeping(), vec![Duration::from_secs(60)]);
    let rendered = env.page.take();
    assert_eq!(rendered.len(), 1);
    assert!(matches!(&rendered[0], Rendered::Sone(v) if v.id == sone("b")));

    // still registered, so watching again does not restart it
    assert!(!spawn_watch(&pool, &env, "a"));
}

#[test]
fn poller_accepts_trait_objects() {
    let env = Env::new();
    env.server.server().set_sone(sone("a"), Status::Idle, false);
    let backend: &dyn Backend = &env.server;
    let view: &dyn StatusView = &*env.page;
    let clock: &dyn Sleeper = &*env.clock;
    let config = PollConfig::default();
    let poller = Poller::new(backend, view, clock, &config);

    let mut run = Box::pin(poller.run(sone("a")));
    let mut cx = Context::from_waker(futures::task::noop_waker_ref());
    assert!(run.as_mut().poll(&mut cx).is_pending());
    assert_eq!(env.clock.sleeping(), vec![Duration::from_secs(5)]);

    env.clock.wake_next();
    assert!(run.as_mut().poll(&mut cx).is_pending());
    assert_eq!(env.clock.sleeping(), vec![Duration::from_secs(60)]);
    assert!(matches!(env.page.last(), Some(Rendered::Sone(v)) if v.id == sone("a")));
}
