use crossterm::event::KeyEvent;
use gymreg_core::Outcome;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// Something bad happened; display it to the user
    Problem(String),

    /// Some amount of time passed and we should do clock things
    TimePassed,

    /// A registration attempt finished
    Registered(Outcome),
}
