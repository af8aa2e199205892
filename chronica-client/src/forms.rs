use chronica_common::model::{
    contact::ContactMessage,
    post::{CreatePost, PLACEHOLDER_IMAGE_URL},
};

/// Fields of the post-creation form.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

impl PostForm {
    /// Builds the create payload, applying the placeholder for a blank image
    /// URL on the client side as well.
    #[must_use]
    pub fn to_create_post(&self) -> CreatePost {
        let image_url = if self.image_url.trim().is_empty() {
            PLACEHOLDER_IMAGE_URL.to_owned()
        } else {
            self.image_url.clone()
        };

        CreatePost {
            title: self.title.clone(),
            content: self.content.clone(),
            image_url: Some(image_url),
            date: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fields of the contact form. Submitted verbatim: every field goes out
/// exactly as typed, empty ones included, with no validation.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    #[must_use]
    pub fn to_message(&self) -> ContactMessage {
        ContactMessage {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            subject: Some(self.subject.clone()),
            message: Some(self.message.clone()),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
