pub mod events;

pub use events::ScreenEvent;
