//! Minimal robots.txt rules for the `*` user agent

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    allow: bool,
    prefix: String,
}

/// Allow/Disallow prefixes applying to every crawler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRules {
    rules: Vec<Rule>,
}

impl RobotsRules {
    /// Rules that allow everything (used when robots.txt is unavailable)
    pub fn allow_all() -> Self {
        RobotsRules::default()
    }

    /// Parse robots.txt, keeping only groups addressed to `User-agent: *`
    pub fn parse(text: &str) -> Self {
        let mut rules = Vec::new();
        let mut group_applies = false;
        // A run of consecutive User-agent lines opens one group
        let mut in_agent_run = false;

        for raw in text.lines() {
            let line = raw.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    if !in_agent_run {
                        group_applies = false;
                    }
                    in_agent_run = true;
                    if value == "*" {
                        group_applies = true;
                    }
                }
                "allow" | "disallow" => {
                    in_agent_run = false;
                    // An empty Disallow places no restriction
                    if group_applies && !value.is_empty() {
                        rules.push(Rule {
                            allow: key == "allow",
                            prefix: value.to_string(),
                        });
                    }
                }
                _ => {
                    in_agent_run = false;
                }
            }
        }

        RobotsRules { rules }
    }

    /// Longest matching prefix decides; on a tie Allow wins
    pub fn is_allowed(&self, path: &str) -> bool {
        let mut best: Option<&Rule> = None;

        for rule in &self.rules {
            if !path.starts_with(&rule.prefix) {
                continue;
            }
            best = match best {
                None => Some(rule),
                Some(current) if rule.prefix.len() > current.prefix.len() => Some(rule),
                Some(current) if rule.prefix.len() == current.prefix.len() && rule.allow => {
                    Some(rule)
                }
                keep => keep,
            };
        }

        best.is_none_or(|rule| rule.allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all_by_default() {
        assert!(RobotsRules::allow_all().is_allowed("/anything"));
        assert!(RobotsRules::parse("").is_allowed("/anything"));
    }

    #[test]
    fn test_disallow_prefix() {
        let rules = RobotsRules::parse("User-agent: *\nDisallow: /private/\n");
        assert!(!rules.is_allowed("/private/page"));
        assert!(rules.is_allowed("/public/page"));
    }

    #[test]
    fn test_other_agents_ignored() {
        let rules = RobotsRules::parse(
            "User-agent: Googlebot\nDisallow: /\n\nUser-agent: *\nDisallow: /tmp/\n",
        );
        assert!(rules.is_allowed("/blog/"));
        assert!(!rules.is_allowed("/tmp/x"));
    }

    #[test]
    fn test_grouped_agents_share_rules() {
        let rules = RobotsRules::parse("User-agent: bingbot\nUser-agent: *\nDisallow: /drafts\n");
        assert!(!rules.is_allowed("/drafts/post"));
    }

    #[test]
    fn test_longest_match_and_allow_tie() {
        let rules = RobotsRules::parse(
            "User-agent: *\nDisallow: /blog/\nAllow: /blog/public/\nDisallow: /same\nAllow: /same\n",
        );
        assert!(!rules.is_allowed("/blog/secret"));
        assert!(rules.is_allowed("/blog/public/post"));
        assert!(rules.is_allowed("/same/page"));
    }

    #[test]
    fn test_empty_disallow_and_comments() {
        let rules = RobotsRules::parse("# site rules\nUser-agent: * # everyone\nDisallow:\n");
        assert!(rules.is_allowed("/"));
    }
}
