use signbook_shared::path::{parse_path, PathParseError};
use signbook_shared::payload::{
    parse_view_box, SignaturePayload, MAX_MESSAGE_LEN, MAX_NAME_LEN, MAX_PATH_LEN,
};

#[derive(Debug, PartialEq)]
pub enum PayloadError {
    EmptyName,
    NameTooLong,
    MessageTooLong,
    PathTooLong,
    BadPath(PathParseError),
    BadViewBox,
}

impl PayloadError {
    pub fn message(&self) -> &'static str {
        match self {
            PayloadError::EmptyName => "name must not be empty",
            PayloadError::NameTooLong => "name too long",
            PayloadError::MessageTooLong => "message too long",
            PayloadError::PathTooLong => "path too long",
            PayloadError::BadPath(_) => "path is not a valid signature path",
            PayloadError::BadViewBox => "viewBox must be \"0 0 <width> <height>\"",
        }
    }
}

/// Re-checks a submitted payload against the same rules the client applies
/// and returns the trimmed copy that gets stored. The path must parse under
/// the shared grammar so everything in the guestbook is renderable.
pub fn validate_payload(payload: &SignaturePayload) -> Result<SignaturePayload, PayloadError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(PayloadError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(PayloadError::NameTooLong);
    }
    let message = payload.message.trim();
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(PayloadError::MessageTooLong);
    }
    if payload.path.len() > MAX_PATH_LEN {
        return Err(PayloadError::PathTooLong);
    }
    parse_path(&payload.path).map_err(PayloadError::BadPath)?;
    if parse_view_box(&payload.view_box).is_none() {
        return Err(PayloadError::BadViewBox);
    }
    Ok(SignaturePayload {
        path: payload.path.clone(),
        view_box: payload.view_box.trim().to_string(),
        name: name.to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SignaturePayload {
        SignaturePayload {
            path: "M 0 0 L 10 10 L 20 5".into(),
            view_box: "0 0 640 480".into(),
            name: "  Ada  ".into(),
            message: " hello ".into(),
        }
    }

    #[test]
    fn valid_payload_is_trimmed() {
        let accepted = validate_payload(&payload()).unwrap();
        assert_eq!(accepted.name, "Ada");
        assert_eq!(accepted.message, "hello");
        assert_eq!(accepted.path, "M 0 0 L 10 10 L 20 5");
    }

    #[test]
    fn empty_message_is_allowed() {
        let mut payload = payload();
        payload.message = "   ".into();
        let accepted = validate_payload(&payload).unwrap();
        assert_eq!(accepted.message, "");
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut payload = payload();
        payload.name = "   ".into();
        assert_eq!(validate_payload(&payload), Err(PayloadError::EmptyName));
    }

    #[test]
    fn oversized_fields_are_rejected() {
        let mut long_name = payload();
        long_name.name = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(validate_payload(&long_name), Err(PayloadError::NameTooLong));

        let mut long_message = payload();
        long_message.message = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert_eq!(
            validate_payload(&long_message),
            Err(PayloadError::MessageTooLong)
        );

        let mut long_path = payload();
        long_path.path = "M 0 0 ".repeat(MAX_PATH_LEN);
        assert_eq!(validate_payload(&long_path), Err(PayloadError::PathTooLong));
    }

    #[test]
    fn malformed_path_is_rejected() {
        let mut payload = payload();
        payload.path = "L 0 0 M 1".into();
        assert_eq!(
            validate_payload(&payload),
            Err(PayloadError::BadPath(PathParseError::LeadingLineTo))
        );
    }

    #[test]
    fn malformed_view_box_is_rejected() {
        let mut payload = payload();
        payload.view_box = "0 0 -5 480".into();
        assert_eq!(validate_payload(&payload), Err(PayloadError::BadViewBox));
    }
}
