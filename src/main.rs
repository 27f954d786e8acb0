//! Munch Drop entry point
//!
//! On the web the game is driven from JS through `platform::web::WebGame`.
//! Natively this runs one headless session with an autopilot player and
//! banks the result in a file-backed progression store.

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use munch_drop::consts::DISPLAY_FRAME_MS;
    use munch_drop::persistence::FileStore;
    use munch_drop::sim::{GameEvent, GameSession, ItemKind};
    use munch_drop::{AssetCatalog, Game, ProgressionStore, Tuning, Viewport};

    /// Give up after five minutes of simulated play
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    const VIEWPORT_WIDTH: f32 = 400.0;
    const VIEWPORT_HEIGHT: f32 = 700.0;

    /// Pick a pointer x: chase the lowest food, sidestep poison that is
    /// about to land on us.
    fn autopilot(session: &GameSession) -> f32 {
        let player = &session.player;
        let player_center = player.center();

        let threat = session
            .items
            .iter()
            .filter(|i| i.kind == ItemKind::Poison)
            .filter(|i| i.center().y > player.pos.y - player.height * 2.0)
            .find(|i| (i.center().x - player_center.x).abs() < player.width);

        let desired = if let Some(poison) = threat {
            let away = if poison.center().x > player_center.x {
                -1.0
            } else {
                1.0
            };
            player_center.x + away * player.width * 1.5
        } else {
            session
                .items
                .iter()
                .filter(|i| i.kind == ItemKind::Food)
                .filter(|i| i.pos.y < player.pos.y + player.height)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|food| food.center().x)
                .unwrap_or(player_center.x)
        };

        session.pointer_target(desired)
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let seed = std::env::args()
            .nth(1)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or_else(munch_drop::platform::entropy_seed);
        let data_dir = std::env::var_os("MUNCH_DROP_DATA")
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("munch-drop"));

        let store = match FileStore::open(&data_dir) {
            Ok(store) => store,
            Err(e) => {
                log::error!("Cannot open save directory {}: {}", data_dir.display(), e);
                std::process::exit(1);
            }
        };
        log::info!("Saving to {} (seed {})", store.dir().display(), seed);

        let session = GameSession::new(
            Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            Tuning::load(&store),
            AssetCatalog::default(),
            seed,
        );
        let mut game = Game::new(session, ProgressionStore::open(store));

        let token = game.start_game();
        let mut timestamp = 0.0;
        let mut frames = 0;
        while game.is_running() && frames < MAX_FRAMES {
            let target = autopilot(game.session());
            let Some(frame) = game.frame(token, timestamp, target) else {
                break;
            };
            for event in &frame.events {
                match event {
                    GameEvent::LevelChanged { level } => println!("Level {}!", level),
                    GameEvent::ResultRevealed { final_score, tier } => {
                        println!("Final score: {} - {}", final_score, tier.message());
                    }
                    _ => {}
                }
            }
            if let Some(reward) = frame.reward {
                println!("+{} XP / +{} coins", reward.xp, reward.coins);
                if let Some(level) = reward.level_up {
                    println!("LEVEL UP! Lv.{}", level);
                }
            }
            timestamp += DISPLAY_FRAME_MS;
            frames += 1;
        }

        if game.session().is_playing() {
            println!(
                "Stopped after {} frames still alive with {} points",
                frames,
                game.session().score
            );
        }

        let summary = game.progression().summary();
        println!(
            "Lv.{} {} | {} XP ({:.0}% to next) | {} coins",
            summary.level,
            summary.rank_name,
            summary.experience,
            summary.next_level_progress,
            summary.coins
        );
        match summary.next_rank {
            Some((rank, levels)) => println!("{} more level(s) to {}", levels, rank.name()),
            None => println!("Top rank reached!"),
        }
    }
}
