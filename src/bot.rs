//! The chat-facing half of the bot: recognising commands, and answering them
//! by editing a placeholder message once Figma has been consulted.

pub mod command;
pub mod flow;
pub mod reply;
