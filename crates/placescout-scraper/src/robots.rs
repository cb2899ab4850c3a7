//! robots.txt parsing and path checks.

use std::collections::HashMap;

/// Parsed robots.txt rules, keyed by lowercase user-agent token.
#[derive(Debug, Clone, Default)]
pub struct RobotsRules {
    rules: HashMap<String, AgentRules>,
    default_rules: AgentRules,
}

#[derive(Debug, Clone, Default)]
struct AgentRules {
    disallow: Vec<String>,
    allow: Vec<String>,
}

impl AgentRules {
    fn merge(&mut self, other: &AgentRules) {
        self.disallow.extend(other.disallow.iter().cloned());
        self.allow.extend(other.allow.iter().cloned());
    }
}

impl RobotsRules {
    /// Rules that allow everything, used when robots.txt is missing or
    /// unreadable.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Parse robots.txt content. Consecutive `User-agent` lines share the
    /// rule block that follows them.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut robots = Self::default();
        let mut current_agents: Vec<String> = Vec::new();
        let mut current_rules = AgentRules::default();
        let mut in_rules = false;

        for line in content.lines() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }

            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let directive = directive.trim().to_lowercase();
            let value = value.trim();

            match directive.as_str() {
                "user-agent" => {
                    if in_rules {
                        robots.store(&current_agents, &current_rules);
                        current_agents.clear();
                        current_rules = AgentRules::default();
                        in_rules = false;
                    }
                    current_agents.push(value.to_lowercase());
                }
                "disallow" => {
                    in_rules = true;
                    // An empty Disallow means "allow everything".
                    if !value.is_empty() {
                        current_rules.disallow.push(value.to_string());
                    }
                }
                "allow" => {
                    in_rules = true;
                    if !value.is_empty() {
                        current_rules.allow.push(value.to_string());
                    }
                }
                _ => {}
            }
        }

        robots.store(&current_agents, &current_rules);
        robots
    }

    fn store(&mut self, agents: &[String], rules: &AgentRules) {
        for agent in agents {
            if agent == "*" {
                self.default_rules.merge(rules);
            } else {
                self.rules.entry(agent.clone()).or_default().merge(rules);
            }
        }
    }

    /// Check if a path is allowed for a user-agent.
    ///
    /// The agent's own group applies when present (matched on the product
    /// token, e.g. `placescout` for `placescout/0.1 (...)`), otherwise the `*`
    /// group. Rules may use `*` for any run of characters and a trailing `$`
    /// to anchor the end of the path. Of the matching rules the longest wins;
    /// on a tie `Allow` wins.
    #[must_use]
    pub fn is_allowed(&self, user_agent: &str, path: &str) -> bool {
        let token = user_agent
            .split(['/', ' '])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        let rules = self
            .rules
            .get(&token)
            .or_else(|| {
                self.rules
                    .iter()
                    .find(|(k, _)| !token.is_empty() && token.contains(k.as_str()))
                    .map(|(_, v)| v)
            })
            .unwrap_or(&self.default_rules);

        let longest = |patterns: &[String]| {
            patterns
                .iter()
                .filter(|p| rule_matches(p, path))
                .map(String::len)
                .max()
        };

        match (longest(&rules.allow), longest(&rules.disallow)) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(allow), Some(disallow)) => allow >= disallow,
        }
    }
}

/// Match one robots.txt path rule against a path.
fn rule_matches(rule: &str, path: &str) -> bool {
    let (pattern, anchored) = match rule.strip_suffix('$') {
        Some(p) => (p, true),
        None => (rule, false),
    };

    let mut segments = pattern.split('*');
    let first = segments.next().unwrap_or_default();
    let Some(mut rest) = path.strip_prefix(first) else {
        return false;
    };

    let tail: Vec<&str> = segments.collect();
    let Some((last, middle)) = tail.split_last() else {
        return !anchored || rest.is_empty();
    };

    // Leftmost match for each inner segment leaves the most room for the rest.
    for segment in middle {
        match rest.find(segment) {
            Some(at) => rest = &rest[at + segment.len()..],
            None => return false,
        }
    }

    if anchored {
        rest.ends_with(last)
    } else {
        rest.contains(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENT: &str = "placescout/0.1 (contact-discovery)";

    #[test]
    fn empty_file_allows_everything() {
        let robots = RobotsRules::parse("");
        assert!(robots.is_allowed(AGENT, "/contact"));
    }

    #[test]
    fn wildcard_disallow_blocks_prefix() {
        let robots = RobotsRules::parse("User-agent: *\nDisallow: /private\n");
        assert!(!robots.is_allowed(AGENT, "/private/contact"));
        assert!(robots.is_allowed(AGENT, "/contact"));
    }

    #[test]
    fn disallow_root_blocks_everything() {
        let robots = RobotsRules::parse("User-agent: *\nDisallow: /\n");
        assert!(!robots.is_allowed(AGENT, "/"));
        assert!(!robots.is_allowed(AGENT, "/about"));
    }

    #[test]
    fn empty_disallow_allows_everything() {
        let robots = RobotsRules::parse("User-agent: *\nDisallow:\n");
        assert!(robots.is_allowed(AGENT, "/contact"));
    }

    #[test]
    fn longer_allow_overrides_disallow() {
        let robots = RobotsRules::parse("User-agent: *\nDisallow: /pages\nAllow: /pages/contact\n");
        assert!(robots.is_allowed(AGENT, "/pages/contact"));
        assert!(!robots.is_allowed(AGENT, "/pages/about"));
    }

    #[test]
    fn specific_agent_group_takes_precedence() {
        let robots = RobotsRules::parse(
            "User-agent: *\nDisallow: /\n\nUser-agent: placescout\nDisallow: /admin\n",
        );
        assert!(robots.is_allowed(AGENT, "/contact"));
        assert!(!robots.is_allowed(AGENT, "/admin"));
        assert!(!robots.is_allowed("otherbot/1.0", "/contact"));
    }

    #[test]
    fn consecutive_user_agents_share_rules() {
        let robots = RobotsRules::parse(
            "User-agent: googlebot\nUser-agent: placescout\nDisallow: /contact\n",
        );
        assert!(!robots.is_allowed(AGENT, "/contact"));
        assert!(!robots.is_allowed("Googlebot/2.1", "/contact"));
        assert!(robots.is_allowed("otherbot", "/contact"));
    }

    #[test]
    fn comments_and_unknown_directives_are_ignored() {
        let robots = RobotsRules::parse(
            "# hello\nUser-agent: * # everyone\nCrawl-delay: 10\nSitemap: https://a.test/sitemap.xml\nDisallow: /tmp # scratch\n",
        );
        assert!(!robots.is_allowed(AGENT, "/tmp/x"));
        assert!(robots.is_allowed(AGENT, "/contact"));
    }

    #[test]
    fn star_matches_any_run_of_characters() {
        let robots = RobotsRules::parse("User-agent: *\nDisallow: /*contact\n");
        assert!(!robots.is_allowed(AGENT, "/contact"));
        assert!(!robots.is_allowed(AGENT, "/pages/contact"));
        assert!(!robots.is_allowed(AGENT, "/contact-us"));
        assert!(robots.is_allowed(AGENT, "/about"));
    }

    #[test]
    fn dollar_anchors_end_of_path() {
        let robots = RobotsRules::parse("User-agent: *\nDisallow: /about$\n");
        assert!(!robots.is_allowed(AGENT, "/about"));
        assert!(robots.is_allowed(AGENT, "/about-us"));
        assert!(robots.is_allowed(AGENT, "/about/team"));
    }

    #[test]
    fn star_and_dollar_combine() {
        let robots = RobotsRules::parse("User-agent: *\nDisallow: /*.php$\n");
        assert!(!robots.is_allowed(AGENT, "/contact.php"));
        assert!(!robots.is_allowed(AGENT, "/pages/about.php"));
        assert!(robots.is_allowed(AGENT, "/contact.php/extra"));
        assert!(robots.is_allowed(AGENT, "/contact"));
    }

    #[test]
    fn longer_wildcard_allow_overrides_disallow() {
        let robots =
            RobotsRules::parse("User-agent: *\nDisallow: /pages/\nAllow: /pages/*contact\n");
        assert!(robots.is_allowed(AGENT, "/pages/get-in-contact"));
        assert!(!robots.is_allowed(AGENT, "/pages/menu"));
    }

    #[test]
    fn rule_matching_edge_cases() {
        assert!(rule_matches("/", "/anything"));
        assert!(rule_matches("/a*b*c", "/axxbyyc"));
        assert!(!rule_matches("/a*b*c", "/axxcyyb"));
        assert!(rule_matches("/*$", "/whatever"));
        assert!(rule_matches("/team$", "/team"));
        assert!(!rule_matches("/team$", "/teams"));
        assert!(!rule_matches("/team", "/about/team"));
    }
}
