//! Sticky Dodgeball entry point
//!
//! Headless driver: builds a small arena, runs a scripted match with a
//! fixed-timestep accumulator and logs what happens.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use sticky_dodgeball::{Settings, ticks_to_secs};
    use sticky_dodgeball::audio::{AudioManager, AudioSink, SoundEffect, Tone};
    use sticky_dodgeball::consts::*;
    use sticky_dodgeball::settings::BallTuning;
    use sticky_dodgeball::scene::{Scene, SceneService, route_events};
    use sticky_dodgeball::sim::{
        ArenaWorld, Bounds, GameBuilder, GameEvent, GameState, InputSource, LayerMask, MatchSetup,
        PlayerId, PlayerInput, RoundPhase, TickInput, spread_spawns, tick,
    };

    /// Virtual frame length of the fake display
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after ten minutes of game time
    const MAX_TICKS: u64 = 50 * 600;
    const THROW_EVERY: u64 = 20;
    /// Bots lie on the floor at this height
    const FLOOR_LANE_Y: f32 = -7.5;
    /// Low over the floor lane, clear of the pillar and ledges
    const BALL_SPAWNS: [Vec2; 4] = [
        Vec2::new(-9.0, -6.0),
        Vec2::new(-3.5, -6.0),
        Vec2::new(3.5, -6.0),
        Vec2::new(9.0, -6.0),
    ];

    struct LogScenes {
        current: Scene,
    }

    impl SceneService for LogScenes {
        fn load(&mut self, scene: Scene) {
            log::info!("Scene {} -> {}", self.current, scene);
            self.current = scene;
        }
    }

    struct LogSink {
        volume: f32,
    }

    impl AudioSink for LogSink {
        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn volume(&self) -> f32 {
            self.volume
        }

        fn play(&mut self, effect: SoundEffect, tones: &[Tone], volume: f32) {
            log::trace!("Sound {:?}: {} tones at {:.2}", effect, tones.len(), volume);
        }
    }

    /// Quicker knockouts than the defaults when no settings file is given
    fn demo_settings() -> Settings {
        Settings {
            ball: BallTuning {
                damage: 25,
                respawn_delay: 1.0,
                ..BallTuning::default()
            },
            ..Settings::default()
        }
    }

    /// Bots: chase and dash at the ball, lob it at the nearest opponent on a rhythm
    #[derive(Default)]
    struct ScriptedInput {
        positions: Vec<Vec2>,
        alive: Vec<bool>,
        ball: Vec2,
        holder: Option<PlayerId>,
        throw_strength: f32,
    }

    impl ScriptedInput {
        fn observe(&mut self, state: &GameState) {
            self.positions = state.players.iter().map(|p| p.pos).collect();
            self.alive = state.players.iter().map(|p| p.is_alive()).collect();
            self.ball = state.ball.pos;
            self.holder = state.ball.holder();
            self.throw_strength = state.settings.ball.throw_strength;
        }

        /// Aim above `target` by the drop over the flight time
        fn lob(&self, from: Vec2, target: Vec2) -> Vec2 {
            let flight = from.distance(target) / self.throw_strength.max(1.0);
            let drop = 0.5 * -GRAVITY * flight * flight;
            (target + Vec2::Y * drop - from).normalize_or(Vec2::X)
        }

        fn nearest_opponent(&self, me: usize) -> Option<Vec2> {
            let here = *self.positions.get(me)?;
            self.positions
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != me && self.alive.get(i).copied().unwrap_or(false))
                .map(|(_, &p)| p)
                .min_by(|a, b| a.distance(here).total_cmp(&b.distance(here)))
        }
    }

    impl InputSource for ScriptedInput {
        fn poll(&mut self, player: PlayerId, tick: u64) -> PlayerInput {
            let Some(&pos) = self.positions.get(player.index()) else {
                return PlayerInput::default();
            };
            let aim = if self.holder == Some(player) {
                self.nearest_opponent(player.index())
                    .map(|target| self.lob(pos, target))
                    .unwrap_or(Vec2::X)
            } else {
                (self.ball - pos).normalize_or(Vec2::X)
            };
            let phase = tick + player.index() as u64 * 7;

            PlayerInput {
                movement: Vec2::new((self.ball.x - pos.x).clamp(-1.0, 1.0), 0.0),
                aim,
                dash: phase % 150 == 0,
                throw: phase % THROW_EVERY == 0,
                pickup: true,
            }
        }
    }

    /// Floor, two ledges and a pillar
    fn build_arena(world: &mut ArenaWorld) {
        world.add_segment(Vec2::new(-16.0, -8.0), Vec2::new(16.0, -8.0));
        world.add_segment(Vec2::new(-12.0, -2.0), Vec2::new(-6.0, -2.0));
        world.add_segment(Vec2::new(6.0, -2.0), Vec2::new(12.0, -2.0));
        world.add_circle(Vec2::new(0.0, -5.0), 1.5);
    }

    struct Game {
        state: GameState,
        world: ArenaWorld,
        input: ScriptedInput,
        scenes: LogScenes,
        audio: AudioManager,
        accumulator: f32,
    }

    impl Game {
        fn new(settings: Settings, setup: MatchSetup, seed: u64) -> sticky_dodgeball::Result<Self> {
            let mut world = ArenaWorld::new();
            build_arena(&mut world);

            let mut builder = GameBuilder::new(setup)
                .settings(settings.clone())
                .seed(seed)
                .bounds(Bounds::centered(16.0, 9.0));
            let lane = FLOOR_LANE_Y + 0.5;
            for spawn in spread_spawns(setup.players, Vec2::new(-12.0, lane), Vec2::new(12.0, lane)) {
                let body = world.add_body(spawn, PLAYER_RADIUS, LayerMask::PLAYER, 0.0);
                builder = builder.player(body, spawn);
            }
            let ball = world.add_body(BALL_SPAWNS[0], BALL_RADIUS, LayerMask::BALL, 0.5);
            let state = builder.ball(ball, BALL_SPAWNS).build(&mut world)?;

            let sink: Box<dyn AudioSink> = Box::new(LogSink { volume: 1.0 });
            let audio = AudioManager::from_settings(Some(sink), &settings.audio);

            Ok(Self {
                state,
                world,
                input: ScriptedInput::default(),
                scenes: LogScenes { current: Scene::Setup },
                audio,
                accumulator: 0.0,
            })
        }

        fn finished(&self) -> bool {
            self.state.match_state.phase == RoundPhase::MatchOver
        }

        /// Run simulation ticks for one frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.input.observe(&self.state);
                let input = TickInput::gather(&mut self.input, self.state.players.len(), self.state.time_ticks);
                tick(&mut self.state, &mut self.world, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                self.dispatch_events();
            }
        }

        fn dispatch_events(&mut self) {
            let events = self.state.drain_events();
            for event in &events {
                match event {
                    GameEvent::PlayerEliminated { player } => log::info!("{} eliminated", player),
                    GameEvent::RoundResolved { round, outcome } => {
                        log::info!("Round {} resolved: {:?}", round, outcome)
                    }
                    other => log::debug!("{:?}", other),
                }
            }
            route_events(&mut self.scenes, &events);
            self.audio.play_events(&events);
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Sticky Dodgeball (headless) starting...");

        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_or_default(path),
            None => demo_settings(),
        };
        let setup = match MatchSetup::new(4, 3) {
            Ok(setup) => setup,
            Err(e) => {
                log::error!("Bad match setup: {}", e);
                return;
            }
        };

        let mut game = match Game::new(settings, setup, 0x5eed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Failed to start match: {}", e);
                return;
            }
        };
        game.dispatch_events();

        while !game.finished() && game.state.time_ticks < MAX_TICKS {
            game.update(FRAME_DT);
        }

        if !game.finished() {
            log::warn!(
                "Stopped after {:.0}s without a result ({} players standing)",
                ticks_to_secs(game.state.time_ticks),
                game.state.alive_count()
            );
        }

        let results = game.state.match_state.results();
        for standing in results.podium() {
            println!("#{} {}", standing.place, standing.label());
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on the web; the host provides the loop
}
