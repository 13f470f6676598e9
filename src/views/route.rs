use std::fmt::{self, Display, Formatter};

/// Somewhere the application can navigate to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Register,
    Sessions,
    SessionDetail(u64),
    SessionCreate,
    SessionUpdate(u64),
    Me,
    NotFound,
    /// Go back to the previous page.
    Back,
}

impl Route {
    /// Figure out which route a URL path refers to.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> =
            path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Root,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["sessions"] => Route::Sessions,
            ["sessions", "create"] => Route::SessionCreate,
            ["sessions", "detail", id] => {
                id.parse().map(Route::SessionDetail).unwrap_or(Route::NotFound)
            },
            ["sessions", "update", id] => {
                id.parse().map(Route::SessionUpdate).unwrap_or(Route::NotFound)
            },
            ["me"] => Route::Me,
            _ => Route::NotFound,
        }
    }

    pub fn requires_login(self) -> bool {
        matches!(
            self,
            Route::Sessions
                | Route::SessionDetail(_)
                | Route::SessionCreate
                | Route::SessionUpdate(_)
                | Route::Me
        )
    }

    pub fn requires_logged_out(self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Route::Root => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Sessions => write!(f, "/sessions"),
            Route::SessionDetail(id) => write!(f, "/sessions/detail/{}", id),
            Route::SessionCreate => write!(f, "/sessions/create"),
            Route::SessionUpdate(id) => write!(f, "/sessions/update/{}", id),
            Route::Me => write!(f, "/me"),
            Route::NotFound => write!(f, "/404"),
            Route::Back => write!(f, ".."),
        }
    }
}
