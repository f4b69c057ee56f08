//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. `diesel print-schema` against a migrated database regenerates
//! them.

diesel::table! {
    /// Read-only category catalogue articles are filed under.
    categories (id) {
        id -> Int4,
        name -> Text,
    }
}

diesel::table! {
    /// Published articles.
    ///
    /// `slug` is unique and never changes after insert.
    articles (id) {
        id -> Int8,
        slug -> Text,
        title -> Text,
        description -> Text,
        body -> Text,
        tag_list -> Array<Text>,
        author_id -> Uuid,
        category_id -> Int4,
        /// Hosted cover image URL returned by the upload service.
        cover_image_url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments and replies.
    ///
    /// A trigger keeps threads two levels deep and replies on their parent's
    /// article. Deleting an article or a parent cascades here.
    comments (id) {
        id -> Int8,
        article_id -> Int8,
        author_id -> Uuid,
        body -> Text,
        parent_comment_id -> Nullable<Int8>,
        /// Edit counter guarding optimistic updates.
        iteration -> Int4,
        is_edited -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reasons a comment may be reported for.
    report_reasons (id) {
        id -> Int4,
        description -> Text,
    }
}

diesel::table! {
    /// Moderation reports, unique per (user, comment, reason).
    reported_comments (user_id, comment_id, reason_id) {
        user_id -> Uuid,
        comment_id -> Int8,
        reason_id -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(articles -> categories (category_id));
diesel::joinable!(comments -> articles (article_id));
diesel::joinable!(reported_comments -> comments (comment_id));
diesel::joinable!(reported_comments -> report_reasons (reason_id));

diesel::allow_tables_to_appear_in_same_query!(
    categories,
    articles,
    comments,
    report_reasons,
    reported_comments,
);
