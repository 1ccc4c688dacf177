#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_translate()
            || cmd.is_source_set()
            || cmd.is_target_set()
            || cmd.is_swap()
            || cmd.is_auto_detect()
            || cmd.is_history()
            || cmd.is_use()
            || cmd.is_clear()
            || cmd.is_max_history()
            || cmd.is_language_list()
            || cmd.is_input()
            || cmd.is_save()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Arguments joined back together, for values such as language names that
    /// may contain spaces.
    pub fn arg_text(&self) -> String {
        return self.args.join(" ");
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_translate(&self) -> bool {
        return ["/t", "/translate"].contains(&self.command.as_str());
    }

    pub fn is_source_set(&self) -> bool {
        return ["/f", "/from"].contains(&self.command.as_str());
    }

    pub fn is_target_set(&self) -> bool {
        return ["/to"].contains(&self.command.as_str());
    }

    pub fn is_swap(&self) -> bool {
        return ["/s", "/swap"].contains(&self.command.as_str());
    }

    pub fn is_auto_detect(&self) -> bool {
        return ["/auto"].contains(&self.command.as_str());
    }

    pub fn is_history(&self) -> bool {
        return ["/hi", "/history"].contains(&self.command.as_str());
    }

    pub fn is_use(&self) -> bool {
        return ["/u", "/use"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/clear"].contains(&self.command.as_str());
    }

    pub fn is_max_history(&self) -> bool {
        return ["/max"].contains(&self.command.as_str());
    }

    pub fn is_language_list(&self) -> bool {
        return ["/l", "/languages"].contains(&self.command.as_str());
    }

    pub fn is_input(&self) -> bool {
        return ["/i", "/input"].contains(&self.command.as_str());
    }

    pub fn is_save(&self) -> bool {
        return ["/save"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}
