//! Stage strategy catalog.
//!
//! One immutable entry per sending stage. Lookup is an exhaustive match on
//! [`Stage`], so a missing entry is a compile error rather than a runtime
//! miss. `Completed` has no reminder of its own and resolves to the
//! `initial` entry.

use database::Stage;

/// Stage-specific extras layered on top of the core strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageExtras {
    /// How the stage frames time pressure, if at all.
    pub urgency_framing: Option<&'static str>,
    /// Offer the lead an easy way to opt out.
    pub unsubscribe_offer: bool,
    /// PS lines for stages that carry one. Empty means no PS.
    pub postscripts: &'static [&'static str],
}

/// Messaging strategy for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub stage: Stage,
    pub name: &'static str,
    pub tone: &'static str,
    pub approach: &'static str,
    /// Psychological trigger the message leans on.
    pub trigger: &'static str,
    pub openers: &'static [&'static str],
    pub calls_to_action: &'static [&'static str],
    pub extras: StageExtras,
}

impl Strategy {
    /// Whether this stage inserts a PS line.
    pub fn has_postscript(&self) -> bool {
        !self.extras.postscripts.is_empty()
    }
}

static INITIAL: Strategy = Strategy {
    stage: Stage::Initial,
    name: "Gentle nudge",
    tone: "friendly and low-pressure",
    approach: "Briefly resurface the original message and restate its single most relevant point.",
    trigger: "reciprocity",
    openers: &[
        "Just floating my last note back to the top of your inbox.",
        "I know inboxes get busy, so I wanted to follow up briefly.",
        "Circling back on the note I sent over earlier.",
    ],
    calls_to_action: &[
        "Would a quick 15-minute call this week be useful?",
        "Is this something worth a short conversation?",
        "Open to a brief chat to see if it fits?",
    ],
    extras: StageExtras {
        urgency_framing: None,
        unsubscribe_offer: false,
        postscripts: &[
            "Happy to send a two-minute overview instead if that is easier.",
            "If someone else on your team owns this, I would appreciate a pointer.",
        ],
    },
};

static R1: Strategy = Strategy {
    stage: Stage::R1,
    name: "Value add",
    tone: "helpful and consultative",
    approach: "Share one concrete insight or result relevant to their role instead of repeating the pitch.",
    trigger: "curiosity",
    openers: &[
        "I came across something I thought might be relevant to your team.",
        "One thing we keep hearing from teams like yours:",
        "A quick idea that might be useful regardless of timing.",
    ],
    calls_to_action: &[
        "Would it help if I shared how others approached this?",
        "Worth a quick call to compare notes?",
        "Want me to send over the details?",
    ],
    extras: StageExtras {
        urgency_framing: None,
        unsubscribe_offer: false,
        postscripts: &[
            "We just published a short case study on this and I can send it over.",
            "No pressure at all; even a quick no helps me plan.",
        ],
    },
};

static R2: Strategy = Strategy {
    stage: Stage::R2,
    name: "Social proof",
    tone: "confident and credible",
    approach: "Point to similar companies that solved the same problem and what changed for them.",
    trigger: "social proof",
    openers: &[
        "Teams in a similar position have been tackling this lately.",
        "A company much like yours recently faced the same challenge.",
        "I wanted to share what peers in your space are doing.",
    ],
    calls_to_action: &[
        "Would you like to see how they did it?",
        "Can I walk you through their results in 15 minutes?",
        "Interested in a short comparison for your team?",
    ],
    extras: StageExtras {
        urgency_framing: None,
        unsubscribe_offer: false,
        postscripts: &[
            "Happy to connect you with one of them directly.",
            "The results surprised us too.",
        ],
    },
};

static R3: Strategy = Strategy {
    stage: Stage::R3,
    name: "Problem agitation",
    tone: "direct and empathetic",
    approach: "Name the cost of leaving the problem unsolved and how it tends to grow over time.",
    trigger: "loss aversion",
    openers: &[
        "Most teams only notice this problem once it starts costing them.",
        "Something that often gets overlooked until it becomes urgent:",
        "I have been thinking about the challenge I mentioned earlier.",
    ],
    calls_to_action: &[
        "Would it be worth 15 minutes to size the impact for your team?",
        "Should we take a quick look at where this stands for you?",
        "Is this on your radar this quarter?",
    ],
    extras: StageExtras {
        urgency_framing: Some("Mention gently that the problem compounds the longer it waits."),
        unsubscribe_offer: false,
        postscripts: &[],
    },
};

static R4: Strategy = Strategy {
    stage: Stage::R4,
    name: "New angle",
    tone: "fresh and curious",
    approach: "Approach from a different angle than previous messages, such as a new use case or stakeholder.",
    trigger: "novelty",
    openers: &[
        "Let me try a different angle.",
        "Perhaps I led with the wrong point before.",
        "Here is a perspective I have not shared yet.",
    ],
    calls_to_action: &[
        "Does this angle resonate more?",
        "Would a different use case be more relevant for you?",
        "Is there someone else I should be talking to?",
    ],
    extras: StageExtras {
        urgency_framing: Some("Reference timing only if it is natural, such as planning cycles."),
        unsubscribe_offer: false,
        postscripts: &[
            "If the timing is off, tell me when to check back.",
            "A one-word reply is plenty.",
        ],
    },
};

static R5: Strategy = Strategy {
    stage: Stage::R5,
    name: "Last value push",
    tone: "respectful and concise",
    approach: "Summarize the value in two sentences and make responding effortless.",
    trigger: "scarcity",
    openers: &[
        "I will keep this short.",
        "One more quick note before I step back.",
        "I do not want to crowd your inbox, so briefly:",
    ],
    calls_to_action: &[
        "Should I keep you on my list for later this quarter?",
        "Is a quick yes or no possible?",
        "Would a short call next week work?",
    ],
    extras: StageExtras {
        urgency_framing: Some("Say plainly that follow-ups are winding down."),
        unsubscribe_offer: false,
        postscripts: &[],
    },
};

static R6: Strategy = Strategy {
    stage: Stage::R6,
    name: "Breakup",
    tone: "gracious and final",
    approach: "Close the loop politely, leave the door open, and make it clear this is the last message.",
    trigger: "closure",
    openers: &[
        "I have reached out a few times and have not heard back, which is completely fine.",
        "This will be my last note on this.",
        "I am going to close the loop on my end.",
    ],
    calls_to_action: &[
        "If things change, just reply to this email.",
        "Should I close your file for now?",
        "Is it fair to assume this is not a priority?",
    ],
    extras: StageExtras {
        urgency_framing: Some("Make it explicit that this is the final follow-up."),
        unsubscribe_offer: true,
        postscripts: &[],
    },
};

/// Strategy entry for a stage.
pub fn strategy_for(stage: Stage) -> &'static Strategy {
    match stage {
        Stage::Initial => &INITIAL,
        Stage::R1 => &R1,
        Stage::R2 => &R2,
        Stage::R3 => &R3,
        Stage::R4 => &R4,
        Stage::R5 => &R5,
        Stage::R6 => &R6,
        Stage::Completed => &INITIAL,
    }
}

/// Every entry in stage order.
pub fn all() -> [&'static Strategy; 7] {
    Stage::SENDING.map(strategy_for)
}
