//! Control panel bindings
//!
//! The panel itself is out of scope; this module turns its raw widget input
//! into controller events and reads back what it should display.

mod panel;

pub use panel::{ControlPanelBinder, ObjectPanel, PanelEvent, PanelState, WidgetInput};
