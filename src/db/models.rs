//! Database Models - structs representing database tables (used by sqlx/serde).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// Enumerations
// ============================================================================

/// User role enum (`user_role` in Postgres)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Editor,
}

/// Project difficulty enum (`difficulty` in Postgres)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "difficulty", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

/// Blog lifecycle enum (`blog_status` in Postgres)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "blog_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Published,
    Archived,
}

/// Payment method enum (`payment_method` in Postgres)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Stripe,
    Paypal,
    Mpesa,
    Bmac,
}

// ============================================================================
// Users
// ============================================================================

/// User model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    // Never leaves the server in API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Option<UserRole>,
}

/// User update (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
}

// ============================================================================
// Projects
// ============================================================================

/// Project model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub difficulty: Difficulty,
    pub github_url: String,
    pub live_url: Option<String>,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New project for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub difficulty: Difficulty,
    pub github_url: String,
    pub live_url: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Tags to attach on creation (join rows, not a column).
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

/// Project update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub difficulty: Option<Difficulty>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub tag_ids: Option<Vec<Uuid>>,
}

// ============================================================================
// Blogs
// ============================================================================

/// Blog model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image_url: String,
    pub status: BlogStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New blog for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    pub user_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image_url: String,
    pub status: Option<BlogStatus>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

/// Blog update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlog {
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
    pub status: Option<BlogStatus>,
    pub tag_ids: Option<Vec<Uuid>>,
}

// ============================================================================
// Tags
// ============================================================================

/// Tag model (shared across blogs and projects)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// New tag for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,
}

// ============================================================================
// Blog comments
// ============================================================================

/// Blog comment model. `parent_id` points at another comment for threaded
/// replies; the chain has no enforced depth limit.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogComment {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New comment for insertion (blog id comes from the URL)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogComment {
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
}

// ============================================================================
// Education
// ============================================================================

/// Education entry model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    pub user_id: Uuid,
    pub institution: String,
    pub degree_or_course: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub grade_or_score: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// New education entry for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEducation {
    pub user_id: Uuid,
    pub institution: String,
    pub degree_or_course: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub grade_or_score: Option<String>,
    pub location: String,
    pub description: Option<String>,
}

/// Education entry update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEducation {
    pub institution: Option<String>,
    pub degree_or_course: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub grade_or_score: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

// ============================================================================
// Certifications
// ============================================================================

/// Certification model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub issued_by: String,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub file_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// New certification for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCertification {
    pub user_id: Uuid,
    pub title: String,
    pub issued_by: String,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub file_url: String,
    pub description: Option<String>,
}

/// Certification update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCertification {
    pub title: Option<String>,
    pub issued_by: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub file_url: Option<String>,
    pub description: Option<String>,
}

// ============================================================================
// Courses
// ============================================================================

/// Course model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub is_paid: bool,
    pub price: Option<Decimal>,
    pub media_urls: Vec<String>,
    pub downloadable_links: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New course for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub is_paid: bool,
    pub price: Option<Decimal>,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub downloadable_links: Vec<String>,
}

/// Course update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_paid: Option<bool>,
    pub price: Option<Decimal>,
    pub media_urls: Option<Vec<String>>,
    pub downloadable_links: Option<Vec<String>>,
}

/// Course module model (ordered within a course)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// New module for insertion (course id comes from the URL)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseModule {
    pub title: String,
    pub position: i32,
}

/// Module update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseModule {
    pub title: Option<String>,
    pub position: Option<i32>,
}

/// Course lesson model (ordered within a module)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseLesson {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub position: i32,
    pub video_url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub is_free_preview: bool,
    pub created_at: DateTime<Utc>,
}

/// New lesson for insertion (module id comes from the URL)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseLesson {
    pub title: String,
    pub position: i32,
    pub video_url: Option<String>,
    pub duration_seconds: Option<i32>,
    #[serde(default)]
    pub is_free_preview: bool,
}

/// Lesson update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseLesson {
    pub title: Option<String>,
    pub position: Option<i32>,
    pub video_url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub is_free_preview: Option<bool>,
}

// ============================================================================
// Purchases
// ============================================================================

/// Purchase model. A NULL `course_id` together with `is_donation = true`
/// records a donation rather than a course purchase.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub external_payment_id: String,
    pub is_donation: bool,
    pub status: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// New purchase for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub external_payment_id: String,
    #[serde(default)]
    pub is_donation: bool,
    pub message: Option<String>,
}

// ============================================================================
// Subscribers
// ============================================================================

/// Newsletter subscriber model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

/// New subscriber for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubscriber {
    pub email: String,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&UserRole::Editor).unwrap(), "\"editor\"");
        assert_eq!(
            serde_json::to_string(&Difficulty::Intermediate).unwrap(),
            "\"intermediate\""
        );
        assert_eq!(serde_json::to_string(&BlogStatus::Draft).unwrap(), "\"draft\"");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Mpesa).unwrap(),
            "\"mpesa\""
        );
    }

    #[test]
    fn test_enums_deserialize_lowercase() {
        let role: UserRole = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(role, UserRole::Editor);
        let status: BlogStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, BlogStatus::Archived);
        let method: PaymentMethod = serde_json::from_str("\"bmac\"").unwrap();
        assert_eq!(method, PaymentMethod::Bmac);
        assert!(serde_json::from_str::<UserRole>("\"owner\"").is_err());
    }

    #[test]
    fn test_user_password_hash_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: UserRole::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("passwordHash"));
        assert!(json.contains("jane@example.com"));
    }

    #[test]
    fn test_new_project_defaults_empty_arrays() {
        let payload = serde_json::json!({
            "userId": Uuid::new_v4(),
            "title": "CLI toolbox",
            "description": "Assorted terminal tools",
            "difficulty": "basic",
            "githubUrl": "https://github.com/example/cli-toolbox"
        });
        let new_project: NewProject = serde_json::from_value(payload).unwrap();
        assert!(new_project.tech_stack.is_empty());
        assert!(new_project.image_urls.is_empty());
        assert!(new_project.tag_ids.is_empty());
        assert!(new_project.live_url.is_none());
    }

    #[test]
    fn test_purchase_decimal_amount_roundtrip() {
        let payload = serde_json::json!({
            "userId": Uuid::new_v4(),
            "courseId": null,
            "amount": "19.99",
            "paymentMethod": "stripe",
            "externalPaymentId": "pi_123",
            "isDonation": true
        });
        let new_purchase: NewPurchase = serde_json::from_value(payload).unwrap();
        assert!(new_purchase.is_donation);
        assert!(new_purchase.course_id.is_none());
        assert_eq!(new_purchase.amount.to_string(), "19.99");
    }
}
