use serde::{Deserialize, Deserializer};

/// Case-sensitive substring match against `name` OR `description`.
/// An absent term matches every record.
///
/// The term is trimmed and stripped of U+0000 (which PostgreSQL text rejects);
/// a term left blank means no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchFilter {
    #[serde(default, deserialize_with = "deserialize_term")]
    search: Option<String>,
}

impl SearchFilter {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            search: clean_term(term.into()),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn matches(&self, name: &str, description: Option<&str>) -> bool {
        match self.term() {
            None => true,
            Some(term) => name.contains(term) || description.is_some_and(|d| d.contains(term)),
        }
    }
}

fn clean_term(raw: String) -> Option<String> {
    let term = raw.replace('\0', "");
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_string())
}

fn deserialize_term<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(clean_term))
}
