/// The views a user can be on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Creating a new account
    #[default]
    Register,

    /// Logging in with an existing account
    Login,
}
