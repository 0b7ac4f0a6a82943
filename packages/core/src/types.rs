// ABOUTME: Domain type definitions
// ABOUTME: Users, projects, contributors, issues, comments and their input/read models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::utils::age_on;

/// The identity making a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User(i64),
}

impl Actor {
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Actor::Anonymous => None,
            Actor::User(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::User(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum ProjectType {
    #[serde(rename = "back-end")]
    #[sqlx(rename = "back-end")]
    BackEnd,
    #[serde(rename = "front-end")]
    #[sqlx(rename = "front-end")]
    FrontEnd,
    #[serde(rename = "iOS")]
    #[sqlx(rename = "iOS")]
    Ios,
    #[serde(rename = "Android")]
    #[sqlx(rename = "Android")]
    Android,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum IssuePriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueTag {
    Bug,
    Feature,
    #[default]
    Task,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum IssueStatus {
    #[default]
    #[serde(rename = "To Do")]
    #[sqlx(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Finished")]
    #[sqlx(rename = "Finished")]
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub can_be_contacted: bool,
    pub can_data_be_shared: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Age in whole years today, when the date of birth is known
    pub fn age(&self) -> Option<u32> {
        self.date_of_birth
            .map(|dob| age_on(dob, Utc::now().date_naive()))
    }
}

/// Public representation of a user account, with the derived age
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<u32>,
    pub can_be_contacted: bool,
    pub can_data_be_shared: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        let age = user.age();
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            date_of_birth: user.date_of_birth,
            age,
            can_be_contacted: user.can_be_contacted,
            can_data_be_shared: user.can_data_be_shared,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreateInput {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub can_be_contacted: Option<bool>,
    #[serde(default)]
    pub can_data_be_shared: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdateInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub can_be_contacted: Option<bool>,
    pub can_data_be_shared: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub project_type: ProjectType,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Project list entry with membership and issue counts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub project_type: ProjectType,
    pub author_id: i64,
    pub contributors_count: i64,
    pub issues_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Project with its contributors and issue summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub author_name: String,
    pub contributors: Vec<ContributorDetail>,
    pub issues: Vec<IssueSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreateInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Contributor {
    pub id: i64,
    pub user_id: i64,
    pub project_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Body of a contributor addition or reassignment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContributorInput {
    pub user_id: i64,
}

/// Contributor row joined with the contributing user's identity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContributorDetail {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub project_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Issue {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: IssuePriority,
    pub tag: IssueTag,
    pub status: IssueStatus,
    pub project_id: i64,
    pub author_id: i64,
    pub assigned_to: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Issue list entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IssueSummary {
    pub id: i64,
    pub title: String,
    pub project_id: i64,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub tag: IssueTag,
    pub author_id: i64,
    pub author_name: String,
    pub assigned_to: Option<i64>,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Issue with its comments and the names of the users it references
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueDetail {
    #[serde(flatten)]
    pub issue: Issue,
    pub project_name: String,
    pub author_name: String,
    pub assigned_to_name: Option<String>,
    pub comments: Vec<CommentDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCreateInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<IssuePriority>,
    #[serde(default)]
    pub tag: Option<IssueTag>,
    #[serde(default)]
    pub status: Option<IssueStatus>,
    #[serde(default)]
    pub assigned_to: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<IssuePriority>,
    pub tag: Option<IssueTag>,
    pub status: Option<IssueStatus>,
    /// `None` leaves the assignee unchanged, `Some(None)` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub uuid: String,
    pub description: String,
    pub issue_id: i64,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's username
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentDetail {
    pub uuid: String,
    pub description: String,
    pub issue_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInput {
    pub description: String,
}

/// Distinguishes an absent field from an explicit `null`
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_project_type_wire_names() {
        let encoded = serde_json::to_string(&ProjectType::Ios).unwrap();
        assert_eq!(encoded, "\"iOS\"");

        let decoded: ProjectType = serde_json::from_str("\"back-end\"").unwrap();
        assert_eq!(decoded, ProjectType::BackEnd);
    }

    #[test]
    fn test_issue_enum_defaults() {
        assert_eq!(IssuePriority::default(), IssuePriority::Medium);
        assert_eq!(IssueTag::default(), IssueTag::Task);
        assert_eq!(IssueStatus::default(), IssueStatus::ToDo);
        assert_eq!(
            serde_json::to_string(&IssueStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
    }

    #[test]
    fn test_issue_update_distinguishes_null_assignee() {
        let absent: IssueUpdateInput = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert_eq!(absent.assigned_to, None);

        let cleared: IssueUpdateInput = serde_json::from_str(r#"{"assigned_to": null}"#).unwrap();
        assert_eq!(cleared.assigned_to, Some(None));

        let set: IssueUpdateInput = serde_json::from_str(r#"{"assigned_to": 7}"#).unwrap();
        assert_eq!(set.assigned_to, Some(Some(7)));
    }

    #[test]
    fn test_actor_user_id() {
        assert_eq!(Actor::Anonymous.user_id(), None);
        assert_eq!(Actor::User(3).user_id(), Some(3));
        assert!(!Actor::Anonymous.is_authenticated());
    }
}
