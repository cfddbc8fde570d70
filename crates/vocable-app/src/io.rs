use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use vocable_core::entry::{MANUAL_ORIGIN, ReviewJudgment};
use vocable_core::types::AppEvent;

/// Line-command watcher: reads stdin and feeds parsed events into the
/// app loop until cancellation or end of input.
pub async fn watcher_io(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    tracing::info!("command watcher started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("command watcher stopping");
                return Ok(());
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("stdin closed");
                    return Ok(());
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match parse_command(line) {
                    Some(event) => event_tx.send(event).await?,
                    None => tracing::warn!("unrecognized command: {line}"),
                }
            }
        }
    }
}

/// Parse one command line into an event.
///
/// ```text
/// add <français> | <deutsch> [| tag,tag]
/// edit <id> <français> | <deutsch>
/// delete <id>
/// load <mode> [count|-]
/// review <id> correct|practice
/// swap <index>
/// url <url>
/// translate <text>
/// audio <text>
/// login / token <id_token> / logout / whoami
/// reload
/// ```
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "add" => {
            let mut parts = rest.splitn(3, '|');
            let source_text = parts.next()?.trim();
            let target_text = parts.next()?.trim();
            if source_text.is_empty() || target_text.is_empty() {
                return None;
            }
            let tags = parts
                .next()
                .map(|t| {
                    t.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            Some(AppEvent::AddVocabulary {
                source_text: source_text.to_string(),
                target_text: target_text.to_string(),
                origin: MANUAL_ORIGIN.to_string(),
                tags,
            })
        }
        "edit" => {
            let (id, texts) = rest.split_once(char::is_whitespace)?;
            let (source_text, target_text) = texts.split_once('|')?;
            let (source_text, target_text) = (source_text.trim(), target_text.trim());
            if id.is_empty() || source_text.is_empty() || target_text.is_empty() {
                return None;
            }
            Some(AppEvent::EditVocabulary {
                id: id.to_string(),
                source_text: source_text.to_string(),
                target_text: target_text.to_string(),
            })
        }
        "delete" if !rest.is_empty() => Some(AppEvent::DeleteVocabulary {
            id: rest.to_string(),
        }),
        "load" => {
            let mut parts = rest.split_whitespace();
            let mode = parts.next()?.parse().ok()?;
            let count = match parts.next() {
                None | Some("-") => None,
                Some(n) => Some(n.parse().ok()?),
            };
            Some(AppEvent::LoadVocabularies { mode, count })
        }
        "review" => {
            let (id, verdict) = rest.split_once(char::is_whitespace)?;
            let judgment = match verdict.trim() {
                "correct" => ReviewJudgment::Correct,
                "practice" => ReviewJudgment::NeedsPractice,
                _ => return None,
            };
            Some(AppEvent::ReviewFeedback {
                id: id.to_string(),
                judgment,
            })
        }
        "swap" => rest.parse().ok().map(|index| AppEvent::MoveEntry { index }),
        "url" if !rest.is_empty() => Some(AppEvent::FetchArticle {
            url: rest.to_string(),
        }),
        "translate" if !rest.is_empty() => Some(AppEvent::TranslateText {
            text: rest.to_string(),
        }),
        "audio" if !rest.is_empty() => Some(AppEvent::SynthesizeAudio {
            text: rest.to_string(),
        }),
        "login" => Some(AppEvent::Login),
        "token" if !rest.is_empty() => Some(AppEvent::CompleteLogin {
            id_token: rest.to_string(),
        }),
        "logout" => Some(AppEvent::Logout),
        "whoami" => Some(AppEvent::WhoAmI),
        "reload" => Some(AppEvent::ConfigChanged),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocable_core::scheduler::FilterMode;

    #[test]
    fn add_command_with_tags() {
        let event = parse_command("add Bonjour | Guten Tag | greeting, basics").unwrap();
        match event {
            AppEvent::AddVocabulary {
                source_text,
                target_text,
                origin,
                tags,
            } => {
                assert_eq!(source_text, "Bonjour");
                assert_eq!(target_text, "Guten Tag");
                assert_eq!(origin, MANUAL_ORIGIN);
                assert_eq!(tags, vec!["greeting".to_string(), "basics".to_string()]);
            }
            other => panic!("wrong event: {other:?}"),
        }
    }

    #[test]
    fn add_requires_both_texts() {
        assert!(parse_command("add Bonjour |").is_none());
        assert!(parse_command("add | Guten Tag").is_none());
        assert!(parse_command("add Bonjour").is_none());
    }

    #[test]
    fn load_command_modes_and_count() {
        match parse_command("load stage-3 5").unwrap() {
            AppEvent::LoadVocabularies { mode, count } => {
                assert_eq!(mode, FilterMode::Stage(3));
                assert_eq!(count, Some(5));
            }
            other => panic!("wrong event: {other:?}"),
        }

        // "-" is the no-cap sentinel
        match parse_command("load today -").unwrap() {
            AppEvent::LoadVocabularies { mode, count } => {
                assert_eq!(mode, FilterMode::Today);
                assert_eq!(count, None);
            }
            other => panic!("wrong event: {other:?}"),
        }

        assert!(parse_command("load stage-9").is_none());
        assert!(parse_command("load today five").is_none());
    }

    #[test]
    fn review_command_judgments() {
        match parse_command("review v42 correct").unwrap() {
            AppEvent::ReviewFeedback { id, judgment } => {
                assert_eq!(id, "v42");
                assert_eq!(judgment, ReviewJudgment::Correct);
            }
            other => panic!("wrong event: {other:?}"),
        }
        assert!(matches!(
            parse_command("review v42 practice").unwrap(),
            AppEvent::ReviewFeedback {
                judgment: ReviewJudgment::NeedsPractice,
                ..
            }
        ));
        assert!(parse_command("review v42 maybe").is_none());
    }

    #[test]
    fn session_and_gateway_commands() {
        assert!(matches!(parse_command("login").unwrap(), AppEvent::Login));
        assert!(matches!(parse_command("logout").unwrap(), AppEvent::Logout));
        assert!(matches!(parse_command("whoami").unwrap(), AppEvent::WhoAmI));
        assert!(matches!(
            parse_command("url https://example.com/article").unwrap(),
            AppEvent::FetchArticle { .. }
        ));
        assert!(matches!(
            parse_command("translate Bonjour tout le monde").unwrap(),
            AppEvent::TranslateText { .. }
        ));
        assert!(matches!(
            parse_command("reload").unwrap(),
            AppEvent::ConfigChanged
        ));
        assert!(parse_command("token").is_none());
        assert!(parse_command("frobnicate").is_none());
    }
}
