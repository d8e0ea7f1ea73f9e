//! Shared helpers for integration tests.

use card_battler::cards::{standard_registry, StandardVariants};
use card_battler::core::{BattleConfig, Board};
use card_battler::games::duel::{Battle, RecordingView};

/// Install a test subscriber once. Set `RUST_LOG` to see engine logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An empty board with the standard variants.
#[allow(dead_code)]
pub fn board(config: BattleConfig) -> (Board, StandardVariants) {
    init_tracing();
    let (registry, variants) = standard_registry().expect("standard variants register");
    (Board::new(config, registry), variants)
}

/// A battle on an empty default board.
#[allow(dead_code)]
pub fn battle() -> (Battle<RecordingView>, StandardVariants) {
    let (board, variants) = board(BattleConfig::default());
    (Battle::new(board, RecordingView::new()), variants)
}
