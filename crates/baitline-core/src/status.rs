//! Status label classification.
//!
//! The structured feed carries free-text status labels ("Email Sent",
//! "Clicked Link", ...). They are classified against a small closed set of
//! keywords by case-insensitive substring search. A label can match several
//! keywords, and a label that matches none contributes to no funnel flag.

/// A recognized status keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKeyword {
    Sent,
    Open,
    Click,
    Submitted,
}

impl StatusKeyword {
    /// All keywords, in funnel order.
    pub const ALL: [StatusKeyword; 4] = [
        StatusKeyword::Sent,
        StatusKeyword::Open,
        StatusKeyword::Click,
        StatusKeyword::Submitted,
    ];

    /// Lowercase substring searched for in a status label.
    pub fn needle(&self) -> &'static str {
        match self {
            StatusKeyword::Sent => "sent",
            StatusKeyword::Open => "open",
            StatusKeyword::Click => "click",
            StatusKeyword::Submitted => "submitted",
        }
    }
}

/// The set of keywords a single status label matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    pub sent: bool,
    pub open: bool,
    pub click: bool,
    pub submitted: bool,
}

impl StatusFlags {
    /// Classify a status label.
    pub fn classify(status: &str) -> Self {
        let lowered = status.to_lowercase();
        let mut flags = Self::default();
        for kw in StatusKeyword::ALL {
            if lowered.contains(kw.needle()) {
                *flags.slot(kw) = true;
            }
        }
        flags
    }

    pub fn has(&self, keyword: StatusKeyword) -> bool {
        match keyword {
            StatusKeyword::Sent => self.sent,
            StatusKeyword::Open => self.open,
            StatusKeyword::Click => self.click,
            StatusKeyword::Submitted => self.submitted,
        }
    }

    fn slot(&mut self, keyword: StatusKeyword) -> &mut bool {
        match keyword {
            StatusKeyword::Sent => &mut self.sent,
            StatusKeyword::Open => &mut self.open,
            StatusKeyword::Click => &mut self.click,
            StatusKeyword::Submitted => &mut self.submitted,
        }
    }

    /// True when the label matched no keyword.
    pub fn is_unrecognized(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert!(StatusFlags::classify("SENT").sent);
        assert!(StatusFlags::classify("sent").sent);
        assert!(StatusFlags::classify("Email Sent").sent);
        assert!(StatusFlags::classify("Clicked Link").click);
        assert!(StatusFlags::classify("Email Opened").open);
        assert!(StatusFlags::classify("Submitted Data").submitted);
    }

    #[test]
    fn test_classify_gophish_labels() {
        let flags = StatusFlags::classify("Email Sent");
        assert!(flags.sent);
        assert!(!flags.open && !flags.click && !flags.submitted);

        let flags = StatusFlags::classify("Clicked Link");
        assert!(flags.click);
        assert!(!flags.sent);
    }

    #[test]
    fn test_substring_semantics_allow_multiple_hits() {
        // Plain substring search: "presented" contains "sent".
        let flags = StatusFlags::classify("Presented and Opened");
        assert!(flags.sent);
        assert!(flags.open);
    }

    #[test]
    fn test_unrecognized_status() {
        let flags = StatusFlags::classify("Campaign Created");
        assert!(flags.is_unrecognized());
        assert!(StatusFlags::classify("").is_unrecognized());
        for kw in StatusKeyword::ALL {
            assert!(!flags.has(kw));
        }
    }

    #[test]
    fn test_has_follows_needles() {
        let label = "Email SENT, Clicked";
        let lowered = label.to_lowercase();
        let flags = StatusFlags::classify(label);
        for kw in StatusKeyword::ALL {
            assert_eq!(flags.has(kw), lowered.contains(kw.needle()), "{:?}", kw);
        }
    }
}
