//! Gesture scripts: recorded host events replayed against a [`Page`].
//!
//! A script is a JSON array of tagged events:
//!
//! ```json
//! [
//!   {"event": "activate"},
//!   {"event": "color", "name": "blue"},
//!   {"event": "size", "value": "12"},
//!   {"event": "down"},
//!   {"event": "move", "x": 10, "y": 10},
//!   {"event": "move", "x": 50, "y": 50},
//!   {"event": "up"}
//! ]
//! ```

use crate::drawing::Point;
use crate::page::Page;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Gesture {
    Activate,
    Down,
    Move { x: f64, y: f64 },
    Up,
    Leave,
    Color { name: String },
    Size { value: SliderValue },
    Clear,
}

/// Slider input as the host reports it: usually text, sometimes a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SliderValue {
    Number(f64),
    Text(String),
}

impl SliderValue {
    pub fn as_text(&self) -> String {
        match self {
            SliderValue::Number(n) => n.to_string(),
            SliderValue::Text(s) => s.clone(),
        }
    }
}

pub fn parse_script(text: &str) -> Result<Vec<Gesture>> {
    Ok(serde_json::from_str(text)?)
}

impl Page {
    /// Deliver one gesture. Drawing gestures before activation fail with
    /// [`Error::NotDrawing`].
    pub fn apply_gesture(&mut self, gesture: &Gesture) -> Result<()> {
        match gesture {
            Gesture::Activate => {
                self.activate_selector();
            }
            Gesture::Down => self.surface_mut()?.pointer_down(),
            Gesture::Move { x, y } => {
                self.surface_mut()?.pointer_move(Point::new(*x, *y));
            }
            Gesture::Up => self.surface_mut()?.pointer_up(),
            Gesture::Leave => self.surface_mut()?.pointer_leave(),
            Gesture::Color { name } => {
                self.surface_mut()?.select_color_named(name)?;
            }
            Gesture::Size { value } => {
                self.surface_mut()?.set_brush_size(&value.as_text())?;
            }
            Gesture::Clear => self.surface_mut()?.clear(),
        }
        Ok(())
    }

    /// Replay a whole script, stopping at the first failing gesture.
    pub fn replay(&mut self, gestures: &[Gesture]) -> Result<()> {
        for (i, g) in gestures.iter().enumerate() {
            self.apply_gesture(g)
                .map_err(|e| Error::ScriptError(format!("gesture #{} ({:?}): {}", i, g, e)))?;
        }
        Ok(())
    }
}
