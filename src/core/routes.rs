//! Screens and the path-style routes that name them

use crate::puzzles::PuzzleKind;
use std::fmt;

const PUZZLES_ROUTE: &str = "/all-puzzles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    AllPuzzles,
    Puzzle(PuzzleKind),
    Login,
    SignUp,
    Profile,
}

impl Screen {
    pub fn route(&self) -> String {
        match self {
            Screen::Home => "/".to_string(),
            Screen::AllPuzzles => PUZZLES_ROUTE.to_string(),
            Screen::Puzzle(kind) => format!("{}/{}", PUZZLES_ROUTE, kind.slug()),
            Screen::Login => "/login".to_string(),
            Screen::SignUp => "/signup".to_string(),
            Screen::Profile => "/profile".to_string(),
        }
    }

    /// Parse a route; a trailing slash is ignored, unknown paths are `None`
    pub fn from_route(route: &str) -> Option<Screen> {
        let route = route.trim();
        let path = match route.trim_end_matches('/') {
            "" if route.starts_with('/') => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => Some(Screen::Home),
            "/login" => Some(Screen::Login),
            "/signup" => Some(Screen::SignUp),
            "/profile" => Some(Screen::Profile),
            PUZZLES_ROUTE => Some(Screen::AllPuzzles),
            other => other
                .strip_prefix(PUZZLES_ROUTE)
                .and_then(|rest| rest.strip_prefix('/'))
                .and_then(PuzzleKind::from_slug)
                .map(Screen::Puzzle),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::AllPuzzles => "All puzzles",
            Screen::Puzzle(kind) => kind.title(),
            Screen::Login => "Log in",
            Screen::SignUp => "Sign up",
            Screen::Profile => "Profile",
        }
    }

    /// Where Esc leads
    pub fn parent(&self) -> Screen {
        match self {
            Screen::Puzzle(_) => Screen::AllPuzzles,
            _ => Screen::Home,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_screen_round_trips() {
        let mut screens = vec![
            Screen::Home,
            Screen::AllPuzzles,
            Screen::Login,
            Screen::SignUp,
            Screen::Profile,
        ];
        screens.extend(PuzzleKind::ALL.iter().map(|k| Screen::Puzzle(*k)));
        for screen in screens {
            assert_eq!(Screen::from_route(&screen.route()), Some(screen));
        }
    }

    #[test]
    fn test_trailing_slash_and_unknown() {
        assert_eq!(Screen::from_route("/login/"), Some(Screen::Login));
        assert_eq!(Screen::from_route("/"), Some(Screen::Home));
        assert_eq!(
            Screen::from_route("/all-puzzles/fractions/"),
            Some(Screen::Puzzle(PuzzleKind::Fractions))
        );
        assert_eq!(Screen::from_route("/all-puzzles/chess"), None);
        assert_eq!(Screen::from_route("/all-puzzlesfractions"), None);
        assert_eq!(Screen::from_route("login"), None);
        assert_eq!(Screen::from_route(""), None);
    }

    #[test]
    fn test_parent() {
        assert_eq!(Screen::Puzzle(PuzzleKind::GcdLcm).parent(), Screen::AllPuzzles);
        assert_eq!(Screen::AllPuzzles.parent(), Screen::Home);
        assert_eq!(Screen::Profile.parent(), Screen::Home);
    }
}
