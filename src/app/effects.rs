use crate::app::{App, Message, Session};

impl App {
    /// Run the disk work a message asked for. `update` never touches the
    /// filesystem itself.
    pub(super) fn handle_message_side_effects(session: &mut Session, msg: &Message) {
        if matches!(msg, Message::PromptSubmit)
            && let Some(request) = session.io_request.as_ref()
        {
            let _scope = crate::perf::scope("app.io_request");
            crate::perf::log_event("io.request", format!("{request:?}"));
            session.run_io_request();
        }
    }
}
