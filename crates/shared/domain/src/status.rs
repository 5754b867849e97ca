//! Account lifecycle status and pending administrative action.
//!
//! Both are single-valued: a user is in exactly one status and carries
//! exactly one pending action at a time.

coded_enum! {
    /// Current lifecycle state of an account
    #[derive(Default)]
    pub enum Status ("status") {
        #[default]
        None = 0,
        Active = 1,
        Deactive = 2,
        Invited = 3,
    }
}

coded_enum! {
    /// Administrative intent waiting to be carried out on an account
    #[derive(Default)]
    pub enum Action ("action") {
        #[default]
        None = 0,
        Reactivate = 1,
        Deactivate = 2,
        ResendInvite = 3,
    }
}

impl Status {
    pub fn is_deactivated(self) -> bool {
        self == Status::Deactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip() {
        for status in Status::ALL {
            assert_eq!(Status::try_from(i64::from(status.code())).unwrap(), *status);
        }
        assert!(Status::try_from(4_i64).is_err());
        assert!(Status::try_from(-1_i64).is_err());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("deactive".parse::<Status>().unwrap(), Status::Deactive);
        assert_eq!(" Invited ".parse::<Status>().unwrap(), Status::Invited);
        assert!("Suspended".parse::<Status>().is_err());
    }

    #[test]
    fn test_action_wire_forms() {
        let action: Action = serde_json::from_str("\"ResendInvite\"").unwrap();
        assert_eq!(action, Action::ResendInvite);

        let action: Action = serde_json::from_str("2").unwrap();
        assert_eq!(action, Action::Deactivate);

        assert_eq!(
            serde_json::to_string(&Action::Reactivate).unwrap(),
            "\"Reactivate\""
        );
    }

    #[test]
    fn test_undefined_values_are_rejected() {
        let err = serde_json::from_str::<Status>("7").unwrap_err();
        assert!(err.to_string().contains("Unknown status value '7'"));

        assert!(serde_json::from_str::<Action>("\"Archive\"").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Status::default(), Status::None);
        assert_eq!(Action::default(), Action::None);
    }
}
