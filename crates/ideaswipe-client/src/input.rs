use crate::app::{Decision, Event};

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Event(Event),
    /// Simulated drag from the card's origin to (dx, dy).
    Drag { dx: f64, dy: f64 },
    Stats,
    Favorites,
    Help,
    Quit,
}

pub const HELP: &str = "\
  l, right       like (accept)
  p, left        pass (reject)
  r              refine current idea
  b, esc         back to the card
  retry          try again after an error
  drag DX [DY]   swipe the card by DX (and DY) pixels
  stats          show counters
  favorites      list liked ideas
  q, quit        exit";

/// Keyboard mapping: left passes, right likes, r refines, escape goes back.
pub fn parse_input(line: &str) -> Option<Input> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?.to_ascii_lowercase();
    let input = match head.as_str() {
        "l" | "like" | "right" => Input::Event(Event::Decision(Decision::Accept)),
        "p" | "pass" | "left" => Input::Event(Event::Decision(Decision::Reject)),
        "r" | "refine" => Input::Event(Event::Refine),
        "b" | "back" | "esc" | "escape" => Input::Event(Event::Back),
        "retry" => Input::Event(Event::Retry),
        "drag" => {
            let dx = parts.next()?.parse().ok()?;
            let dy = match parts.next() {
                Some(raw) => raw.parse().ok()?,
                None => 0.0,
            };
            Input::Drag { dx, dy }
        }
        "stats" => Input::Stats,
        "favorites" | "favs" => Input::Favorites,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_words_map_to_decisions() {
        assert_eq!(
            parse_input("right"),
            Some(Input::Event(Event::Decision(Decision::Accept)))
        );
        assert_eq!(
            parse_input("  LEFT "),
            Some(Input::Event(Event::Decision(Decision::Reject)))
        );
        assert_eq!(parse_input("R"), Some(Input::Event(Event::Refine)));
        assert_eq!(parse_input("esc"), Some(Input::Event(Event::Back)));
    }

    #[test]
    fn drag_takes_offsets() {
        assert_eq!(parse_input("drag 120"), Some(Input::Drag { dx: 120.0, dy: 0.0 }));
        assert_eq!(
            parse_input("drag -40 200"),
            Some(Input::Drag { dx: -40.0, dy: 200.0 })
        );
        assert_eq!(parse_input("drag"), None);
        assert_eq!(parse_input("drag far"), None);
    }

    #[test]
    fn unknown_and_blank_lines_are_ignored() {
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("dance"), None);
    }
}
