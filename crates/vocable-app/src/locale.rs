/// Key-to-string lookup for the two UI languages. Unknown keys fall
/// back to the key itself (logged), mirroring how missing translations
/// are handled everywhere else: degraded output, never a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    De,
    En,
}

#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    lang: Lang,
}

impl Catalog {
    pub fn new(language: &str) -> Self {
        let lang = match language {
            "en" => Lang::En,
            "de" => Lang::De,
            other => {
                tracing::warn!("unknown language {other:?}, falling back to de");
                Lang::De
            }
        };
        Self { lang }
    }

    pub fn t(&self, key: &'static str) -> &'static str {
        let value = match self.lang {
            Lang::De => de(key),
            Lang::En => en(key),
        };
        match value {
            Some(s) => s,
            None => {
                tracing::warn!("translation key not found: {key}");
                key
            }
        }
    }

    /// Resolve `key` and substitute `{name}` placeholders.
    pub fn fmt(&self, key: &'static str, params: &[(&str, &str)]) -> String {
        let mut out = self.t(key).to_string();
        for (name, value) in params {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

fn en(key: &str) -> Option<&'static str> {
    Some(match key {
        "app.ready" => "Ready. Type a command (add, load, review, url, translate, audio, login, logout, whoami, reload).",
        "auth.not_authenticated" => "Not signed in.",
        "auth.login_hint" => "Open this URL to sign in, then run: token <id_token>\n{url}",
        "auth.login_failed" => "Sign-in failed: {reason}",
        "auth.welcome" => "Signed in as {name}.",
        "auth.logged_out" => "Signed out.",
        "auth.last_user" => "Last signed in: {name}",
        "vocab.saved" => "Vocabulary saved.",
        "vocab.updated" => "Vocabulary updated.",
        "vocab.deleted" => "Vocabulary deleted.",
        "vocab.reviewed" => "Review recorded: stage {stage}, {count} reviews.",
        "vocab.not_found" => "No vocabulary with id {id}.",
        "vocab.empty" => "No vocabulary yet. Add your first entry!",
        "vocab.list_header" => "stage  français — deutsch (reviews)",
        "translate.no_result" => "No translation returned.",
        "audio.saved" => "Audio written to {path}",
        "error.request" => "Request failed: {reason}",
        _ => return None,
    })
}

fn de(key: &str) -> Option<&'static str> {
    Some(match key {
        "app.ready" => "Bereit. Befehl eingeben (add, load, review, url, translate, audio, login, logout, whoami, reload).",
        "auth.not_authenticated" => "Nicht angemeldet.",
        "auth.login_hint" => "Diese URL zum Anmelden öffnen, danach: token <id_token>\n{url}",
        "auth.login_failed" => "Anmeldung fehlgeschlagen: {reason}",
        "auth.welcome" => "Angemeldet als {name}.",
        "auth.logged_out" => "Abgemeldet.",
        "auth.last_user" => "Zuletzt angemeldet: {name}",
        "vocab.saved" => "Vokabel gespeichert.",
        "vocab.updated" => "Vokabel aktualisiert.",
        "vocab.deleted" => "Vokabel gelöscht.",
        "vocab.reviewed" => "Wiederholung erfasst: Stufe {stage}, {count} Wiederholungen.",
        "vocab.not_found" => "Keine Vokabel mit Id {id}.",
        "vocab.empty" => "Noch keine Vokabeln. Erste Vokabel hinzufügen!",
        "vocab.list_header" => "Stufe  Français — Deutsch (Wiederholungen)",
        "translate.no_result" => "Keine Übersetzung erhalten.",
        "audio.saved" => "Audio gespeichert unter {path}",
        "error.request" => "Anfrage fehlgeschlagen: {reason}",
        _ => return None,
    })
}
