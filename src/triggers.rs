//! Trigger table: ordered (pattern, replies) rules for canned heckles.
//!
//! Rules are matched against the full message text (every pattern is
//! anchored `^…$`), in registration order; the first hit wins and no
//! later rule is tried. The table is built once at startup and shared
//! read-only across requests.

use regex::Regex;

use crate::error::BotError;
use crate::types::Reply;

/// One pattern-to-replies binding.
#[derive(Debug)]
pub struct TriggerRule {
    pattern: Regex,
    /// Whether the Identity Guard applies to this rule. A couple of rules
    /// in the original registration skip it; that asymmetry is preserved.
    pub guarded: bool,
    replies: Vec<&'static str>,
}

impl TriggerRule {
    pub fn new(pattern: &str, replies: &[&'static str]) -> Result<Self, BotError> {
        Self::build(pattern, replies, true)
    }

    pub fn unguarded(pattern: &str, replies: &[&'static str]) -> Result<Self, BotError> {
        Self::build(pattern, replies, false)
    }

    fn build(pattern: &str, replies: &[&'static str], guarded: bool) -> Result<Self, BotError> {
        let pattern = Regex::new(pattern)
            .map_err(|e| BotError::Config(format!("bad trigger pattern: {}", e)))?;
        Ok(Self {
            pattern,
            guarded,
            replies: replies.to_vec(),
        })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn reply(&self) -> Reply {
        Reply::from_lines(self.replies.iter().copied())
    }

    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Ordered, append-only collection of trigger rules.
#[derive(Debug, Default)]
pub struct TriggerTable {
    rules: Vec<TriggerRule>,
}

impl TriggerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Registration order defines match priority; duplicate
    /// patterns are allowed and the earlier registration always wins.
    pub fn register(&mut self, rule: TriggerRule) {
        self.rules.push(rule);
    }

    /// First registered rule whose pattern fully matches `text`, if any.
    pub fn find_match(&self, text: &str) -> Option<&TriggerRule> {
        self.rules.iter().find(|rule| rule.matches(text))
    }

    pub fn rules(&self) -> &[TriggerRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Build the full heckle table in its original registration order.
pub fn default_table() -> Result<TriggerTable, BotError> {
    let mut table = TriggerTable::new();

    table.register(TriggerRule::new(
        r"^I wonder if there really is life on another planet\.$",
        &["Why do you care? You don’t have a life on this one?"],
    )?);
    table.register(TriggerRule::new(
        r"^Waldorf, the bunny ran away!$",
        &["Well, you know what that makes him…", "Smarter than us"],
    )?);
    table.register(TriggerRule::new(r"^Boo!$", &["Boooo!"])?);
    table.register(TriggerRule::new(
        r"^That was the worst thing I’ve ever heard!$",
        &["It was terrible!"],
    )?);
    table.register(TriggerRule::new(
        r"^Horrendous!$",
        &["Well it wasn’t that bad."],
    )?);
    table.register(TriggerRule::new(
        r"^Oh, yeah\?$",
        &["Well, there were parts of it I liked!"],
    )?);
    table.register(TriggerRule::new(
        r"^Well, I liked a lot of it.$",
        &["Yeah, it was GOOD actually."],
    )?);
    table.register(TriggerRule::new(r"^It was great!$", &["It was wonderful!"])?);
    table.register(TriggerRule::new(r"^Yeah, bravo!$", &["More!"])?);
    table.register(TriggerRule::new(
        r"^Hm. Do you think this channel is educational\?$",
        &["Yes. It'll drive people to read books."],
    )?);
    table.register(TriggerRule::new(
        r"^He was doing okay until he left the channel.$",
        &["Wrong. He was doing okay until he _joined_ the channel."],
    )?);
    table.register(TriggerRule::new(
        r"^I liked that last message.$",
        &["What did you like about it?"],
    )?);
    table.register(TriggerRule::new(r"^Why is that\?$", &["I forgot."])?);
    table.register(TriggerRule::new(
        r"^I'm going to see my lawyer!$",
        &["Why?"],
    )?);
    table.register(TriggerRule::new(
        r"^You gave him a one\?$",
        &["He's never been better."],
    )?);
    table.register(TriggerRule::new(
        r"^You know, the older I get, the more I appreciate good wit.$",
        &["Yeah? What's that got to do with what we just read?"],
    )?);
    table.register(TriggerRule::new(
        r"^That really offended me. I'm a student of Shakespeare.$",
        &["Ha! You were a student _with_ Shakespeare."],
    )?);
    table.register(TriggerRule::new(
        r"^I love it! I love it!$",
        &["Of course he loves it; he's the kind of guy who plants poison ivy."],
    )?);
    table.register(TriggerRule::new(
        r"^More! More!$",
        &["No, not so loud! They may hear you!"],
    )?);
    table.register(TriggerRule::new(
        r"^You plan to like this channel\?$",
        &[":tv: No, I plan to watch television!"],
    )?);
    table.register(TriggerRule::new(
        "^\"Beach Blanket Frankenstein\".$",
        &["Awful."],
    )?);
    table.register(TriggerRule::new(
        r"^Terrible film!$",
        &["Yeah, well, we could read this channel instead."],
    )?);
    table.register(TriggerRule::new(r"^:eyes:$", &[":eyes:"])?);
    table.register(TriggerRule::new(r"^Wonderful.$", &["Terrific film!"])?);
    table.register(TriggerRule::new(
        r"^How do _we read_ it\?$",
        &["_Why_ do we read it?"],
    )?);
    table.register(TriggerRule::unguarded(
        r"^I don't believe it! They've managed the impossible! What an achievement! Bravo, bravo!$",
        &["What, you mean you actually like this channel now?"],
    )?);
    table.register(TriggerRule::new(
        r"^Well, what ails ya\?$",
        &["Insomnia."],
    )?);
    table.register(TriggerRule::new(r"^Did you like it\?$", &["No."])?);
    table.register(TriggerRule::new(
        r"^I wonder if anybody reads this channel besides us\?$",
        &[":zzz:"],
    )?);
    table.register(TriggerRule::new(
        r"^What's wrong with you\?$",
        &["It's either this channel or indigestion. I hope it's indigestion."],
    )?);
    table.register(TriggerRule::new(
        r"^Why indigestion\?$",
        &["It'll get better in a little while."],
    )?);
    table.register(TriggerRule::new(
        r"^You know, I think they were trying to make a point with that comment.$",
        &["What's the point?"],
    )?);
    table.register(TriggerRule::new(
        r"^You know, that was almost funny.$",
        &["They better be careful, they'll spoil a perfect record."],
    )?);
    table.register(TriggerRule::new(
        r"^Are you ready for the end of the world\?$",
        &["Sure, it couldn't be worse than this channel."],
    )?);
    table.register(TriggerRule::unguarded(
        r"^Well, Waldorfbot, it's time to go. Thank goodness!$",
        &["Wait, don't leave me here all by myself!"],
    )?);

    Ok(table)
}
