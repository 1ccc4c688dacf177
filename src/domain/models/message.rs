#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

/// A line of feedback for the user, independent of how it is rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    mtype: MessageType,
}

impl Message {
    pub fn new_with_type(mtype: MessageType, text: &str) -> Message {
        return Message {
            text: text.to_string().replace('\t', "  "),
            mtype,
        };
    }

    pub fn info(text: &str) -> Message {
        return Message::new_with_type(MessageType::Info, text);
    }

    pub fn success(text: &str) -> Message {
        return Message::new_with_type(MessageType::Success, text);
    }

    pub fn warning(text: &str) -> Message {
        return Message::new_with_type(MessageType::Warning, text);
    }

    pub fn error(text: &str) -> Message {
        return Message::new_with_type(MessageType::Error, text);
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn append(&mut self, text: &str) {
        self.text += &text.replace('\t', "  ");
    }
}
