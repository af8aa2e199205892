use bson::oid::ObjectId;
use chronica_common::model::{
    contact::{Contact, ContactMessage},
    post::{CreatePost, Post},
};
use serde::{Deserialize, Serialize};

/// Persisted shape of a post in the `blogs` collection.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub date: bson::DateTime,
}

impl PostRecord {
    /// Applies the creation defaults: store-assigned id, placeholder image
    /// for an absent or blank URL, current time for an absent date.
    ///
    /// BSON datetimes carry millisecond precision, so a supplied `date` is
    /// preserved at that precision.
    pub fn new(post: &CreatePost) -> Self {
        Self {
            id: ObjectId::new(),
            title: post.title.clone(),
            content: post.content.clone(),
            image_url: post.image_url_or_placeholder(),
            date: post
                .date
                .map_or_else(bson::DateTime::now, bson::DateTime::from_time_0_3),
        }
    }
}

impl From<PostRecord> for Post {
    fn from(value: PostRecord) -> Self {
        Self {
            id: value.id.into(),
            title: value.title,
            content: value.content,
            image_url: value.image_url,
            date: value.date.to_time_0_3(),
        }
    }
}

/// Persisted shape of a contact message in the `contacts` collection.
/// Absent fields stay absent in the document rather than becoming nulls.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContactRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactRecord {
    pub fn new(message: &ContactMessage) -> Self {
        Self {
            id: ObjectId::new(),
            first_name: message.first_name.clone(),
            last_name: message.last_name.clone(),
            email: message.email.clone(),
            phone: message.phone.clone(),
            subject: message.subject.clone(),
            message: message.message.clone(),
        }
    }
}

impl From<ContactRecord> for Contact {
    fn from(value: ContactRecord) -> Self {
        Self {
            id: value.id.into(),
            message: ContactMessage {
                first_name: value.first_name,
                last_name: value.last_name,
                email: value.email,
                phone: value.phone,
                subject: value.subject,
                message: value.message,
            },
        }
    }
}
