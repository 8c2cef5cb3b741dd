use delve_core::journal::InputPayload;
use delve_core::{
    ControlState, FeedbackEvent, FrameFeedback, Game, RunOutcome, SoundCue, Surface,
};
use tracing::{debug, info};

/// Seconds a HUD banner stays up.
const BANNER_SECONDS: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Playing,
    Paused,
    LevelCleared,
    Dead,
}

/// Shell-level requests captured alongside the control snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellInput {
    pub controls: ControlState,
    /// Edge-triggered request to take the stairs after a clear.
    pub descend: bool,
}

/// An input that was applied to the simulation this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedInput {
    pub tick: u64,
    pub payload: InputPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub remaining: f32,
}

pub struct AppState {
    pub mode: AppMode,
    /// Inputs applied during the latest `tick()` call. Drained by the caller
    /// after each frame to persist to the journal file.
    pub accepted_inputs: Vec<AcceptedInput>,
    pub surface: Surface,
    pub banner: Option<Banner>,
    pub sounds: Vec<SoundCue>,
}

impl AppState {
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        Self {
            mode: AppMode::Playing,
            accepted_inputs: Vec::new(),
            surface: Surface::new(surface_width, surface_height),
            banner: None,
            sounds: Vec::new(),
        }
    }

    /// Runs one presented frame: steps the game while playing, handles pause
    /// and descend, and records every input the game accepted.
    pub fn tick(&mut self, game: &mut Game, input: &ShellInput, dt: f32) {
        self.accepted_inputs.clear();
        self.sounds.clear();
        self.age_banner(dt);

        match self.mode {
            AppMode::Playing => self.step(game, &input.controls, dt),
            AppMode::Paused => {
                if input.controls.pause {
                    debug!(tick = game.current_tick(), "resumed");
                    self.mode = AppMode::Playing;
                }
            }
            AppMode::LevelCleared => {
                if input.descend {
                    self.descend(game);
                }
            }
            AppMode::Dead => {}
        }
    }

    fn step(&mut self, game: &mut Game, controls: &ControlState, dt: f32) {
        let tick = game.current_tick();
        let output = game.frame(controls, dt, &mut self.surface);
        self.accepted_inputs.push(AcceptedInput {
            tick,
            payload: InputPayload::Tick { dt, controls: *controls },
        });
        self.absorb_feedback(&output.feedback);

        if output.tick.pause_requested {
            debug!(tick, "paused");
            self.mode = AppMode::Paused;
        }
        match output.tick.outcome {
            Some(RunOutcome::LevelCleared) => {
                self.mode = AppMode::LevelCleared;
                self.show_banner(format!("Level {} cleared", game.state().depth));
            }
            Some(RunOutcome::Death) => {
                self.mode = AppMode::Dead;
                self.show_banner("You died".to_string());
            }
            None => {}
        }
    }

    fn descend(&mut self, game: &mut Game) {
        let tick = game.current_tick();
        if let Some(depth) = game.descend() {
            info!(depth, "descended");
            self.accepted_inputs.push(AcceptedInput { tick, payload: InputPayload::Descend });
            self.mode = AppMode::Playing;
            self.show_banner(format!("Depth {depth}"));
        }
    }

    fn absorb_feedback(&mut self, feedback: &FrameFeedback) {
        self.sounds.extend(feedback.sounds());
        for event in &feedback.events {
            match event {
                FeedbackEvent::LevelUp { level } => self.show_banner(format!("Level up! {level}")),
                FeedbackEvent::BossIntro { kind } => self.show_banner(format!("{kind:?} awakens")),
                _ => {}
            }
        }
    }

    fn show_banner(&mut self, text: String) {
        self.banner = Some(Banner { text, remaining: BANNER_SECONDS });
    }

    fn age_banner(&mut self, dt: f32) {
        if let Some(banner) = &mut self.banner {
            banner.remaining -= dt.max(0.0);
            if banner.remaining <= 0.0 {
                self.banner = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{GameConfig, ProgressionSnapshot};

    fn game() -> Game {
        Game::new(12345, GameConfig::default(), ProgressionSnapshot::default()).unwrap()
    }

    fn pause_input() -> ShellInput {
        ShellInput {
            controls: ControlState { pause: true, ..ControlState::default() },
            descend: false,
        }
    }

    #[test]
    fn playing_frames_record_tick_inputs() {
        let mut game = game();
        let mut app = AppState::new(64, 48);
        app.tick(&mut game, &ShellInput::default(), 0.016);
        app.tick(&mut game, &ShellInput::default(), 0.016);

        assert_eq!(game.current_tick(), 2);
        assert_eq!(app.accepted_inputs.len(), 1);
        assert_eq!(app.accepted_inputs[0].tick, 1);
    }

    #[test]
    fn pause_press_pauses_and_resumes() {
        let mut game = game();
        let mut app = AppState::new(64, 48);

        app.tick(&mut game, &pause_input(), 0.016);
        assert_eq!(app.mode, AppMode::Paused);
        assert_eq!(game.current_tick(), 0);
        // The pause edge itself is a recorded game tick call.
        assert_eq!(app.accepted_inputs.len(), 1);

        app.tick(&mut game, &ShellInput::default(), 0.016);
        assert_eq!(app.mode, AppMode::Paused);
        assert!(app.accepted_inputs.is_empty());

        app.tick(&mut game, &pause_input(), 0.016);
        assert_eq!(app.mode, AppMode::Playing);
        app.tick(&mut game, &ShellInput::default(), 0.016);
        assert_eq!(game.current_tick(), 1);
    }

    #[test]
    fn descend_is_ignored_while_playing() {
        let mut game = game();
        let mut app = AppState::new(64, 48);
        let input = ShellInput { descend: true, ..ShellInput::default() };
        app.tick(&mut game, &input, 0.016);
        assert_eq!(game.state().depth, 1);
        assert!(matches!(app.accepted_inputs[0].payload, InputPayload::Tick { .. }));
    }

    #[test]
    fn banner_expires() {
        let mut game = game();
        let mut app = AppState::new(64, 48);
        app.banner = Some(Banner { text: "hello".to_string(), remaining: 0.02 });
        app.tick(&mut game, &ShellInput::default(), 0.016);
        assert!(app.banner.is_some());
        app.tick(&mut game, &ShellInput::default(), 0.016);
        assert!(app.banner.is_none());
    }
}
