use std::collections::HashMap;

use clauseguard_common::Error;

/// A prompt with `{{{name}}}` placeholders.
///
/// Values are inserted verbatim and are never re-scanned, so user text that happens to
/// contain placeholder syntax stays literal.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    name: String,
    template: String,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.template.as_str();
        while let Some(start) = rest.find("{{{") {
            let after = &rest[start + 3..];
            match after.find("}}}") {
                Some(end) => {
                    let name = after[..end].trim();
                    if !names.contains(&name) {
                        names.push(name);
                    }
                    rest = &after[end + 3..];
                }
                None => break,
            }
        }
        names
    }

    pub fn render(&self, vars: &HashMap<&str, &str>) -> Result<String, Error> {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 3..];
            let end = after.find("}}}").ok_or_else(|| {
                Error::Unknown(format!("prompt '{}' has an unterminated placeholder", self.name))
            })?;
            let key = after[..end].trim();
            let value = vars.get(key).ok_or_else(|| {
                Error::Unknown(format!("prompt '{}' references unknown variable '{}'", self.name, key))
            })?;
            out.push_str(value);
            rest = &after[end + 3..];
        }
        out.push_str(rest);

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_placeholders() {
        let t = PromptTemplate::new("t", "Location: {{{clientLocation}}}\nDetails: {{{ details }}}");
        let vars = HashMap::from([("clientLocation", "Germany"), ("details", "a shop")]);
        assert_eq!(t.render(&vars).unwrap(), "Location: Germany\nDetails: a shop");
        assert_eq!(t.placeholders(), vec!["clientLocation", "details"]);
    }

    #[test]
    fn user_text_is_not_expanded_again() {
        let t = PromptTemplate::new("t", "[{{{text}}}]");
        let vars = HashMap::from([("text", "{{{text}}} and {{{other}}}")]);
        assert_eq!(t.render(&vars).unwrap(), "[{{{text}}} and {{{other}}}]");
    }

    #[test]
    fn unknown_variable_fails() {
        let t = PromptTemplate::new("t", "{{{missing}}}");
        assert!(t.render(&HashMap::new()).is_err());
    }

    #[test]
    fn unterminated_placeholder_fails() {
        let t = PromptTemplate::new("t", "oops {{{open");
        assert!(t.render(&HashMap::new()).is_err());
    }
}
