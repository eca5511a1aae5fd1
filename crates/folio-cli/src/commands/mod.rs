pub(crate) mod chat_cmd;
pub(crate) mod terminal;
