use parlor_core::ID;
use parlor_core::User;
use parlor_games::Sign;
use parlor_router::ChannelInfo;
use parlor_router::ChatMessage;
use parlor_router::Command;
use parlor_router::CommunityInfo;
use parlor_router::Interaction;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// A formal command invocation as posted by the platform adapter.
///
/// The command name matches [`Command::name`]; arguments arrive as a
/// flat string map and are validated here, so a malformed request dies
/// with a 400 before it ever reaches the router.
#[derive(Debug, Deserialize)]
pub struct InteractionDto {
    pub user: u64,
    pub channel: u64,
    #[serde(default)]
    pub admin: bool,
    pub command: String,
    #[serde(default)]
    pub args: HashMap<String, String>,
}

impl InteractionDto {
    pub fn into_event(self) -> Result<Interaction, String> {
        let command = self.parse()?;
        Ok(Interaction {
            user: ID::from(self.user),
            channel: ID::from(self.channel),
            admin: self.admin,
            command,
        })
    }
    fn parse(&self) -> Result<Command, String> {
        match self.command.as_str() {
            "help" => Ok(Command::Help),
            "birthday-set" => Ok(Command::BirthdaySet {
                date: self.arg("date")?.to_string(),
            }),
            "birthday-wish" => Ok(Command::BirthdayWish {
                user: self.user_arg("user")?,
                message: self.arg("message")?.to_string(),
            }),
            "game-start" => Ok(Command::GameStart),
            "hit" => Ok(Command::Hit),
            "stand" => Ok(Command::Stand),
            "oracle" => Ok(Command::Oracle {
                question: self.arg("question")?.to_string(),
            }),
            "trivia-start" => Ok(Command::TriviaStart),
            "trivia-answer" => Ok(Command::TriviaAnswer {
                text: self.arg("text")?.to_string(),
            }),
            "duel" => Ok(Command::Duel {
                choice: Sign::try_from(self.arg("choice")?)?,
            }),
            "vibes" => Ok(Command::Vibes {
                user: match self.args.get("user") {
                    Some(_) => Some(self.user_arg("user")?),
                    None => None,
                },
            }),
            "checkin" => Ok(Command::CheckIn),
            "blacklist" => Ok(Command::Blacklist {
                user: self.user_arg("user")?,
            }),
            "unblacklist" => Ok(Command::Unblacklist {
                user: self.user_arg("user")?,
            }),
            other => Err(format!("unknown command: {}", other)),
        }
    }
    fn arg(&self, key: &str) -> Result<&str, String> {
        self.args
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| format!("missing argument: {}", key))
    }
    fn user_arg(&self, key: &str) -> Result<ID<User>, String> {
        self.arg(key)?
            .trim()
            .parse::<u64>()
            .map(ID::from)
            .map_err(|_| format!("argument {} is not a user id", key))
    }
}

/// A free-form chat message as posted by the platform adapter.
#[derive(Debug, Deserialize)]
pub struct MessageDto {
    pub user: u64,
    pub channel: u64,
    pub message: u64,
    pub text: String,
}

impl From<MessageDto> for ChatMessage {
    fn from(dto: MessageDto) -> Self {
        ChatMessage {
            user: ID::from(dto.user),
            channel: ID::from(dto.channel),
            message: ID::from(dto.message),
            text: dto.text,
        }
    }
}

/// One community in the `PARLOR_ROSTER` boot configuration. Channel
/// order is the platform's display order.
#[derive(Debug, Deserialize)]
pub struct CommunityDto {
    pub id: u64,
    pub channels: Vec<u64>,
    #[serde(default)]
    pub members: Vec<u64>,
}

impl From<CommunityDto> for CommunityInfo {
    fn from(dto: CommunityDto) -> Self {
        CommunityInfo {
            id: ID::from(dto.id),
            channels: dto
                .channels
                .into_iter()
                .map(|c| ChannelInfo {
                    id: ID::from(c),
                    sendable: true,
                })
                .collect(),
            members: dto.members.into_iter().map(ID::from).collect(),
        }
    }
}

/// An outbound frame pushed to every WebSocket attached to a channel.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Frame {
    Say { text: String },
    React { message: u64, emoji: String },
}

impl Frame {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(command: &str, args: &[(&str, &str)]) -> InteractionDto {
        InteractionDto {
            user: 1,
            channel: 2,
            admin: false,
            command: command.to_string(),
            args: args
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn parses_argumentless_commands() {
        assert!(matches!(
            dto("game-start", &[]).into_event().unwrap().command,
            Command::GameStart
        ));
        assert!(matches!(
            dto("hit", &[]).into_event().unwrap().command,
            Command::Hit
        ));
    }
    #[test]
    fn parses_duel_signs() {
        let event = dto("duel", &[("choice", "b")]).into_event().unwrap();
        assert!(matches!(
            event.command,
            Command::Duel { choice: Sign::B }
        ));
        assert!(dto("duel", &[("choice", "rock")]).into_event().is_err());
    }
    #[test]
    fn vibes_target_is_optional() {
        let bare = dto("vibes", &[]).into_event().unwrap();
        assert!(matches!(bare.command, Command::Vibes { user: None }));
        let aimed = dto("vibes", &[("user", "9")]).into_event().unwrap();
        assert!(matches!(aimed.command, Command::Vibes { user: Some(u) } if u.inner() == 9));
    }
    #[test]
    fn rejects_missing_arguments_and_unknown_commands() {
        assert!(dto("oracle", &[]).into_event().is_err());
        assert!(dto("blacklist", &[("user", "nope")]).into_event().is_err());
        assert!(dto("summon", &[]).into_event().is_err());
    }
    #[test]
    fn frames_serialize_tagged() {
        let frame = Frame::Say {
            text: "hello".to_string(),
        };
        let json: serde_json::Value = serde_json::from_str(&frame.to_json()).unwrap();
        assert_eq!(json["kind"], "say");
        assert_eq!(json["text"], "hello");
    }
}
