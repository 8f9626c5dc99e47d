use crossterm::event::{Event, EventStream};
use futures::StreamExt;

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    Input(Event),
    Reload,
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}
