pub mod action;
pub mod clock;
pub mod config;
pub mod controller;
pub mod finalizer;
pub mod r#loop; // `loop` is reserved keyword, need to escape with `r#`
pub mod mode;
pub mod notification;
pub mod outcome;
pub mod scheduler;
pub mod side;
pub mod termination;
pub mod turn;


pub use action::Action;
pub use clock::{format_clock, ClockPair};
pub use config::SessionConfig;
pub use controller::{MatchController, Phase};
pub use finalizer::{Overlay, Ticket};
pub use mode::{Mode, ParseModeError};
pub use notification::{Notification, Severity};
pub use outcome::{EndReason, GameResult, Outcome};
pub use r#loop::{Frontend, FrontendEvent, GameLoop};
pub use side::Side;
pub use turn::{Selection, TurnState};
