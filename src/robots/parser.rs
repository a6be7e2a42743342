//! Robots.txt parser
//!
//! Parses robots.txt content into the rule set for a single user agent and
//! evaluates URLs against it with longest-prefix matching.

use url::Url;

/// A robots.txt directive kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Allow,
    Disallow,
}

/// A single `(directive, pathPrefix)` rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsRule {
    pub directive: Directive,
    pub path_prefix: String,
}

/// The robots policy selected for one user agent on one domain
///
/// Rules keep their encounter order from the file; evaluation picks the
/// matching rule with the longest path prefix, first-encountered winning
/// ties. Loaded once per domain at crawl start and immutable afterward.
#[derive(Debug, Clone, Default)]
pub struct RobotsPolicy {
    rules: Vec<RobotsRule>,
    crawl_delay: Option<u64>,
}

/// One `User-agent:` group while parsing
#[derive(Debug, Default)]
struct AgentBlock {
    agents: Vec<String>,
    rules: Vec<RobotsRule>,
    crawl_delay: Option<u64>,
}

impl RobotsPolicy {
    /// An empty policy: nothing disallowed, no crawl delay
    ///
    /// Used when robots.txt cannot be fetched or no block applies.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses robots.txt content and selects the block for `user_agent`
    ///
    /// Selection order: the block whose agent name equals `user_agent`
    /// case-insensitively, else the wildcard `*` block, else the empty
    /// rule set. Comments (`#`) are stripped; consecutive `User-agent:`
    /// lines share one block; the last `Crawl-delay:` in a block wins.
    pub fn parse(content: &str, user_agent: &str) -> Self {
        let mut blocks: Vec<AgentBlock> = Vec::new();
        let mut current: Option<AgentBlock> = None;
        let mut collecting_agents = false;

        for line in content.lines() {
            let line = match line.find('#') {
                Some(idx) => &line[..idx],
                None => line,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    if !collecting_agents {
                        if let Some(block) = current.take() {
                            blocks.push(block);
                        }
                        current = Some(AgentBlock::default());
                    }
                    if let Some(block) = current.as_mut() {
                        block.agents.push(value.to_ascii_lowercase());
                    }
                    collecting_agents = true;
                }
                "allow" | "disallow" => {
                    collecting_agents = false;
                    if let Some(block) = current.as_mut() {
                        let directive = if key == "allow" {
                            Directive::Allow
                        } else {
                            Directive::Disallow
                        };
                        block.rules.push(RobotsRule {
                            directive,
                            path_prefix: value.to_string(),
                        });
                    }
                }
                "crawl-delay" => {
                    collecting_agents = false;
                    if let Some(block) = current.as_mut() {
                        if let Ok(seconds) = value.parse::<u64>() {
                            block.crawl_delay = Some(seconds);
                        }
                    }
                }
                _ => {
                    collecting_agents = false;
                }
            }
        }
        if let Some(block) = current.take() {
            blocks.push(block);
        }

        let agent_lowered = user_agent.to_ascii_lowercase();
        let selected = blocks
            .iter()
            .find(|b| b.agents.iter().any(|a| *a == agent_lowered))
            .or_else(|| blocks.iter().find(|b| b.agents.iter().any(|a| a == "*")));

        match selected {
            Some(block) => Self {
                rules: block.rules.clone(),
                crawl_delay: block.crawl_delay,
            },
            None => Self::empty(),
        }
    }

    /// Checks whether a URL is disallowed for the selected agent
    ///
    /// Takes the URL's path (default `/`); among all rules whose prefix is
    /// empty or a prefix of the path, the longest prefix decides. A URL
    /// with no matching rule is allowed.
    pub fn is_blocked(&self, url: &str) -> bool {
        let path = Url::parse(url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| "/".to_string());
        let path = if path.is_empty() { "/".to_string() } else { path };

        let mut best: Option<&RobotsRule> = None;
        for rule in &self.rules {
            if rule.path_prefix.is_empty() || path.starts_with(&rule.path_prefix) {
                let longer = match best {
                    Some(b) => rule.path_prefix.len() > b.path_prefix.len(),
                    None => true,
                };
                if longer {
                    best = Some(rule);
                }
            }
        }

        matches!(
            best,
            Some(RobotsRule {
                directive: Directive::Disallow,
                ..
            })
        )
    }

    /// The crawl delay in whole seconds, when the selected block sets one
    pub fn crawl_delay(&self) -> Option<u64> {
        self.crawl_delay
    }

    /// The rules of the selected block, in encounter order
    pub fn rules(&self) -> &[RobotsRule] {
        &self.rules
    }
}
