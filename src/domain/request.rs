use crate::domain::value::{EmailAddress, MessageText, RawPhoneNumber, SenderId};

/// One SMS to one recipient.
#[derive(Debug, Clone)]
pub struct SendSingleSms {
    phone_number: RawPhoneNumber,
    message: MessageText,
    sender_id: SenderId,
}

impl SendSingleSms {
    pub fn new(phone_number: RawPhoneNumber, message: MessageText, sender_id: SenderId) -> Self {
        Self {
            phone_number,
            message,
            sender_id,
        }
    }

    pub fn phone_number(&self) -> &RawPhoneNumber {
        &self.phone_number
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }
}

/// One SMS text sent to many recipients.
///
/// An empty recipient list is accepted and sent as-is; the provider decides
/// whether it is acceptable.
#[derive(Debug, Clone)]
pub struct SendBatchSms {
    phone_numbers: Vec<RawPhoneNumber>,
    message: MessageText,
    sender_id: SenderId,
}

impl SendBatchSms {
    pub fn new(
        phone_numbers: Vec<RawPhoneNumber>,
        message: MessageText,
        sender_id: SenderId,
    ) -> Self {
        Self {
            phone_numbers,
            message,
            sender_id,
        }
    }

    pub fn phone_numbers(&self) -> &[RawPhoneNumber] {
        &self.phone_numbers
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }
}

/// An email to one or more recipients.
#[derive(Debug, Clone)]
pub struct SendEmail {
    sender: EmailAddress,
    subject: String,
    body: String,
    recipients: Vec<EmailAddress>,
}

impl SendEmail {
    pub fn new(
        sender: EmailAddress,
        subject: impl Into<String>,
        body: impl Into<String>,
        recipients: Vec<EmailAddress>,
    ) -> Self {
        Self {
            sender,
            subject: subject.into(),
            body: body.into(),
            recipients,
        }
    }

    pub fn sender(&self) -> &EmailAddress {
        &self.sender
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn recipients(&self) -> &[EmailAddress] {
        &self.recipients
    }
}
