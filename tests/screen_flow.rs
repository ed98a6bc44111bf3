//! Whole-game flow on the headless platform: menu, a full timed match,
//! results, back to the menu and out.

use pong_screens::GameLoop;
use pong_screens::audio::{AudioManager, Track};
use pong_screens::consts::{MATCH_DURATION_SECS, SCREEN_TICKS_PER_FRAME};
use pong_screens::platform::headless::{FixedMetrics, ManualClock, RecordingAudio, RecordingCanvas, ScriptedInput};
use pong_screens::platform::{InputEvent, Key};
use pong_screens::screens::{Screen, ScreenState};
use pong_screens::settings::Settings;
use pong_screens::sim::{GamePhase, Outcome};

type HeadlessGame = GameLoop<RecordingCanvas, FixedMetrics, ScriptedInput, ManualClock>;

fn headless_game() -> (HeadlessGame, RecordingAudio) {
    let sink = RecordingAudio::default();
    let audio = AudioManager::new(Box::new(sink.clone()), &Settings::default());
    let game = GameLoop::new(
        RecordingCanvas::default(),
        FixedMetrics,
        ScriptedInput::new(),
        ManualClock::default(),
        audio,
    );
    (game, sink)
}

/// Queue `events` for the next frame, advance one frame period and run it
fn step(game: &mut HeadlessGame, events: &[InputEvent]) -> bool {
    game.input_mut().push_frame(events.iter().copied());
    game.clock_mut().advance(SCREEN_TICKS_PER_FRAME);
    game.run_frame().unwrap()
}

fn press(key: Key) -> InputEvent {
    InputEvent::KeyDown(key)
}

#[test]
fn test_full_session() {
    let (mut game, sink) = headless_game();

    // Main menu comes up and starts its music
    assert!(step(&mut game, &[]));
    assert_eq!(game.screens().current(), Screen::MainMenu);
    assert!(game.canvas().texts().contains(&"Pong"));

    assert!(step(&mut game, &[press(Key::Enter)]));
    assert_eq!(game.screens().current(), Screen::Gameplay);

    // Keep serving whenever the ball is dead until the clock runs out
    let limit = 4 * MATCH_DURATION_SECS * 1000 / SCREEN_TICKS_PER_FRAME;
    let mut frames = 0;
    while game.screens().current() == Screen::Gameplay {
        assert!(step(&mut game, &[press(Key::Space)]));
        frames += 1;
        assert!(frames < limit, "match never ended");
    }
    assert_eq!(game.screens().current(), Screen::ResultMenu);

    let result = game.screens().last_result();
    match game.screens().state() {
        ScreenState::ResultMenu(menu) => assert_eq!(menu.result(), result),
        other => panic!("unexpected screen {:?}", other.screen()),
    }

    assert!(step(&mut game, &[]));
    let texts = game.canvas().texts();
    let headline = match result.outcome() {
        Outcome::PlayerWins => "You Win!",
        Outcome::EnemyWins => "You Lose",
        Outcome::Draw => "Draw",
    };
    assert!(texts.contains(&headline), "{texts:?}");
    let score_line = format!("Player {} - {} CPU", result.player, result.enemy);
    assert!(texts.contains(&score_line.as_str()), "{texts:?}");

    // Main Menu is the second option
    assert!(step(&mut game, &[press(Key::Down), press(Key::Enter)]));
    assert_eq!(game.screens().current(), Screen::MainMenu);

    assert!(step(&mut game, &[]));
    assert!(!step(&mut game, &[press(Key::Down), press(Key::Enter)]));

    assert_eq!(
        sink.tracks(),
        vec![Track::Menu, Track::Match, Track::Results, Track::Menu]
    );
}

#[test]
fn test_play_again_starts_fresh_match() {
    let (mut game, _) = headless_game();
    step(&mut game, &[]);
    step(&mut game, &[press(Key::Enter)]);
    step(&mut game, &[]);
    step(&mut game, &[press(Key::Space)]);

    // Jump the clock to the end of the match
    game.clock_mut().advance(MATCH_DURATION_SECS * 1000);
    assert!(step(&mut game, &[]));
    assert_eq!(game.screens().current(), Screen::ResultMenu);

    step(&mut game, &[]);
    assert!(step(&mut game, &[press(Key::Enter)]));
    assert_eq!(game.screens().current(), Screen::Gameplay);

    step(&mut game, &[]);
    match game.screens().state() {
        ScreenState::Gameplay(gameplay) => {
            let state = gameplay.match_state().expect("match set up");
            assert_eq!(state.phase, GamePhase::Waiting);
            assert_eq!(state.accumulated_secs, 0);
            assert_eq!(gameplay.match_result(), Default::default());
        }
        other => panic!("unexpected screen {:?}", other.screen()),
    }
    assert!(game.canvas().texts().contains(&"00:00"));
}

#[test]
fn test_quit_from_gameplay() {
    let (mut game, _) = headless_game();
    step(&mut game, &[]);
    step(&mut game, &[press(Key::Enter)]);
    step(&mut game, &[press(Key::Space)]);
    let presented = game.canvas().presented;

    assert!(!step(&mut game, &[press(Key::Up), InputEvent::Quit]));
    assert_eq!(game.canvas().presented, presented);
    // No teardown on quit
    assert!(game.screens().state().is_initialized());
}

#[test]
fn test_escape_abandons_match() {
    let (mut game, _) = headless_game();
    step(&mut game, &[]);
    step(&mut game, &[press(Key::Enter)]);
    step(&mut game, &[press(Key::Space)]);
    step(&mut game, &[press(Key::Escape)]);
    assert_eq!(game.screens().current(), Screen::MainMenu);
    assert!(!game.screens().state().is_initialized());
}
