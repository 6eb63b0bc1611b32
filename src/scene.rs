//! Scene flow
//!
//! Main menu -> setup -> game (one scene load per round) -> results.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Loadable scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    MainMenu,
    Setup,
    Options,
    Game,
    Results,
}

impl Scene {
    /// Engine scene name
    pub fn name(self) -> &'static str {
        match self {
            Self::MainMenu => "MainMenuScene",
            Self::Setup => "SetupScene",
            Self::Options => "OptionsMenuScene",
            Self::Game => "GameScene",
            Self::Results => "ResultsScene",
        }
    }

    /// Scene to load in response to a match event
    pub fn after_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::RoundChanged { .. } => Some(Self::Game),
            GameEvent::MatchOver { .. } => Some(Self::Results),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scene loader provided by the host
pub trait SceneService {
    fn load(&mut self, scene: Scene);
}

/// Forward every scene change implied by `events`; returns the last one loaded
pub fn route_events<'a>(
    service: &mut dyn SceneService,
    events: impl IntoIterator<Item = &'a GameEvent>,
) -> Option<Scene> {
    let mut last = None;
    for scene in events.into_iter().filter_map(Scene::after_event) {
        log::info!("Loading {}", scene);
        service.load(scene);
        last = Some(scene);
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::MatchResults;
    use crate::sim::PlayerId;

    #[derive(Default)]
    struct Recorder(Vec<Scene>);

    impl SceneService for Recorder {
        fn load(&mut self, scene: Scene) {
            self.0.push(scene);
        }
    }

    #[test]
    fn test_scene_names() {
        assert_eq!(Scene::MainMenu.name(), "MainMenuScene");
        assert_eq!(Scene::Options.to_string(), "OptionsMenuScene");
        assert_eq!(Scene::Results.name(), "ResultsScene");
    }

    #[test]
    fn test_round_and_match_events_route_scenes() {
        let events = vec![
            GameEvent::RoundChanged { round: 2, total_rounds: 3 },
            GameEvent::ScoreChanged { player: PlayerId(0), score: 1 },
            GameEvent::MatchOver {
                results: MatchResults::from_scores(&[1, 0]),
            },
        ];
        let mut recorder = Recorder::default();
        assert_eq!(route_events(&mut recorder, &events), Some(Scene::Results));
        assert_eq!(recorder.0, vec![Scene::Game, Scene::Results]);
    }

    #[test]
    fn test_gameplay_events_do_not_change_scene() {
        let event = GameEvent::BallPickedUp { player: PlayerId(1) };
        assert_eq!(Scene::after_event(&event), None);
    }
}
