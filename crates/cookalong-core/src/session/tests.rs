use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use jiff::Timestamp;

use super::*;
use crate::models::{RecipeOrigin, TimerStatus};

fn recipe(instructions: &[&str]) -> Recipe {
    Recipe {
        id: 7,
        title: "Tomato Soup".to_string(),
        summary: None,
        origin: RecipeOrigin::User,
        external_id: None,
        servings: Some(4),
        ready_minutes: Some(40),
        favorite: false,
        ingredients: vec![],
        steps: instructions
            .iter()
            .enumerate()
            .map(|(i, text)| RecipeStep::new(i as u32 + 1, *text))
            .collect(),
        created_at: Timestamp::from_second(1640995200).unwrap(),
        updated_at: Timestamp::from_second(1640995200).unwrap(),
    }
}

fn three_steps() -> CookAlongSession {
    CookAlongSession::new(recipe(&["Chop onions", "Sweat onions", "Blend"])).unwrap()
}

#[test]
fn test_empty_recipe_rejected() {
    let err = CookAlongSession::new(recipe(&[])).unwrap_err();
    assert!(matches!(err, CookAlongError::InvalidInput { .. }));
}

#[test]
fn test_not_started_state() {
    let session = three_steps();
    assert_eq!(session.status(), SessionStatus::NotStarted);
    assert_eq!(session.current_step_index(), None);
    assert!(session.current_step().is_none());
    assert_eq!(session.progress(), 0.0);
    assert!(!session.has_next_step());
    assert!(!session.has_previous_step());
}

#[test]
fn test_three_step_walkthrough() {
    let mut session = three_steps();

    assert_eq!(session.start_first_step().unwrap().number, 1);
    assert_eq!(session.current_step_index(), Some(0));
    assert!((session.progress() - 1.0 / 3.0).abs() < 1e-9);

    session.next_step().unwrap();
    session.next_step().unwrap();
    assert_eq!(session.current_step_index(), Some(2));
    assert_eq!(session.progress(), 1.0);
    assert!(!session.has_next_step());

    session.complete_session().unwrap();
    assert_eq!(session.status(), SessionStatus::Completed);
    assert!(session.next_step().is_err());
    assert_eq!(session.current_step_index(), Some(2));
}

#[test]
fn test_start_twice_is_rejected() {
    let mut session = three_steps();
    session.start_first_step().unwrap();
    session.next_step().unwrap();
    let err = session.start_first_step().unwrap_err();
    assert!(matches!(
        err,
        CookAlongError::InvalidTransition {
            state: SessionStatus::Active,
            ..
        }
    ));
    assert_eq!(session.current_step_index(), Some(1));
}

#[test]
fn test_navigation_before_start_is_rejected() {
    let mut session = three_steps();
    assert!(session.next_step().is_err());
    assert!(session.previous_step().is_err());
    assert!(session.repeat_step().is_err());
    assert!(session.pause_session().is_err());
    assert!(session.resume_session().is_err());
    assert!(session.complete_session().is_err());
    assert_eq!(session.status(), SessionStatus::NotStarted);
}

#[test]
fn test_next_at_last_step_is_a_contract_violation() {
    let mut session = CookAlongSession::new(recipe(&["Only step"])).unwrap();
    session.start_first_step().unwrap();
    assert!(matches!(
        session.next_step(),
        Err(CookAlongError::InvalidTransition { .. })
    ));
    assert_eq!(session.current_step_index(), Some(0));
    assert_eq!(session.status(), SessionStatus::Active);
}

#[test]
fn test_previous_at_first_step_is_noop() {
    let mut session = three_steps();
    session.start_first_step().unwrap();
    assert_eq!(session.previous_step().unwrap().number, 1);
    assert_eq!(session.current_step_index(), Some(0));

    session.next_step().unwrap();
    assert!(session.has_previous_step());
    assert_eq!(session.previous_step().unwrap().number, 1);
}

#[test]
fn test_repeat_does_not_move() {
    let mut session = three_steps();
    session.start_first_step().unwrap();
    session.next_step().unwrap();
    assert_eq!(session.repeat_step().unwrap().instruction, "Sweat onions");
    assert_eq!(session.current_step_index(), Some(1));
}

#[test]
fn test_pause_resume_keeps_index() {
    let mut session = three_steps();
    session.start_first_step().unwrap();
    session.next_step().unwrap();

    session.pause_session().unwrap();
    assert_eq!(session.status(), SessionStatus::Paused);
    assert!(session.next_step().is_err());
    assert!(session.pause_session().is_err());
    assert!(session.repeat_step().is_ok());

    session.resume_session().unwrap();
    assert_eq!(session.status(), SessionStatus::Active);
    assert_eq!(session.current_step_index(), Some(1));
}

#[test]
fn test_paused_session_cannot_complete() {
    let mut session = three_steps();
    session.start_first_step().unwrap();
    session.pause_session().unwrap();
    assert!(session.complete_session().is_err());
    assert_eq!(session.status(), SessionStatus::Paused);
}

#[test]
fn test_completion_hook_fires_once() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut session = three_steps();
    let counter = Arc::clone(&fired);
    session.on_complete(move |summary| {
        assert_eq!(summary.recipe_title, "Tomato Soup");
        assert_eq!(summary.finished_on_step, 2);
        counter.fetch_add(1, Ordering::SeqCst);
    });

    session.start_first_step().unwrap();
    session.next_step().unwrap();
    let summary = session.complete_session().unwrap();
    assert_eq!(summary.steps_total, 3);
    assert!(session.complete_session().is_err());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_completed_session_ignores_all_navigation() {
    let mut session = three_steps();
    session.start_first_step().unwrap();
    session.complete_session().unwrap();

    let _ = session.next_step();
    let _ = session.previous_step();
    let _ = session.pause_session();
    let _ = session.resume_session();
    assert_eq!(session.current_step_index(), Some(0));
    assert_eq!(session.status(), SessionStatus::Completed);
}

#[test]
fn test_index_bounds_and_predicates_hold_through_walk() {
    let mut session = CookAlongSession::new(recipe(&["a", "b", "c", "d", "e"])).unwrap();
    session.start_first_step().unwrap();
    let total = session.total_steps();

    for round in 0..12 {
        if round % 3 == 2 {
            let _ = session.previous_step();
        } else {
            let _ = session.next_step();
        }
        let index = session.current_step_index().unwrap();
        assert!(index < total);
        assert_eq!(session.has_next_step(), index < total - 1);
        assert_eq!(session.has_previous_step(), index > 0);
        assert!(session.progress() <= 1.0);
    }
}

#[test]
fn test_progress_monotonic_under_next() {
    let mut session = CookAlongSession::new(recipe(&["a", "b", "c", "d"])).unwrap();
    session.start_first_step().unwrap();
    let mut last = session.progress();
    for _ in 0..6 {
        let _ = session.next_step();
        let now = session.progress();
        assert!(now >= last);
        assert!(now <= 1.0);
        last = now;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn test_visiting_steps_suggests_timers() {
    let mut session =
        CookAlongSession::new(recipe(&["Boil water", "Cook pasta 9 minutes", "Drain"])).unwrap();
    session.start_first_step().unwrap();
    assert!(session.timers().is_empty());

    session.next_step().unwrap();
    let timers = session.timers().all();
    assert_eq!(timers.len(), 1);
    assert_eq!(timers[0].step_number(), 2);
    assert_eq!(timers[0].duration(), Duration::from_secs(540));
    assert_eq!(timers[0].status(), TimerStatus::Idle);

    session.next_step().unwrap();
    session.previous_step().unwrap();
    assert_eq!(session.timers().all().len(), 1);
}

#[test]
fn test_oversized_duration_in_step_suggests_nothing() {
    let mut session = CookAlongSession::new(recipe(&[
        "Proof the dough for 99999999999999999999 hours",
        "Bake 30 minutes",
    ]))
    .unwrap();
    session.start_first_step().unwrap();
    assert!(session.timers().is_empty());

    session.next_step().unwrap();
    assert_eq!(session.timers().all().len(), 1);
}
