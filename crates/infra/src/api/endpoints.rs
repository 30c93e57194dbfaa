//! Endpoint catalog
//!
//! Pure functions and constants mapping each backend operation to its path
//! relative to the API base. Query strings built here are percent-encoded,
//! skip unset values and keep a fixed key order. Identifiers are embedded in
//! path segments verbatim.

use leadflow_domain::{
    BugFilters, DownloadLeadsParams, FeedbackFilters, LeadType, LeadsListParams,
    LeadsSummaryParams, PageQuery, UserFilters,
};

use crate::http::{QueryEncoding, QueryParams};

/// Append `query` to `base`, or return `base` unchanged when nothing is set.
pub fn with_query(base: &str, query: &QueryParams) -> String {
    let rendered = query.to_query_string(QueryEncoding::Component);
    if rendered.is_empty() {
        return base.to_string();
    }
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{rendered}")
}

/// Pagination parameters (`offset`, `limit`, `page`, in that order) followed
/// by `extra`.
pub fn with_pagination(base: &str, page: PageQuery, extra: QueryParams) -> String {
    let mut query = QueryParams::new()
        .with("offset", page.offset)
        .with("limit", page.limit)
        .with("page", page.page);
    query.extend(extra);
    with_query(base, &query)
}

fn lead_type(value: Option<LeadType>) -> Option<String> {
    value.map(|t| t.to_string())
}

pub mod auth {
    use super::*;

    pub const SIGNIN: &str = "/auth/login";
    pub const GOOGLE: &str = "/auth/google-login";
    pub const LOGOUT: &str = "/auth/logout";
    pub const SIGNUP: &str = "/auth/register";
    pub const VERIFY_OTP: &str = "/auth/verify-otp";
    pub const RESEND_OTP: &str = "/auth/resend-otp";
    pub const RESET_PASSWORD: &str = "/auth/reset-password-with-otp";
    pub const CHANGE_PASSWORD: &str = "/auth/change-password";
    pub const FORGOT_PASSWORD: &str = "/auth/send-password-reset-otp";
    pub const VERIFY: &str = "/auth/verification";
    pub const REFRESH: &str = "/auth/refresh-token";
    pub const USERS: &str = "/auth/get-user";

    /// Admin user listing
    pub fn users(filters: &UserFilters) -> String {
        with_pagination(
            USERS,
            PageQuery::page(filters.page, filters.limit),
            QueryParams::new()
                .with("search", filters.search.clone())
                .with("is_blocked", filters.is_blocked)
                .with("is_deleted", filters.is_deleted),
        )
    }
}

pub mod leads {
    use super::*;

    pub const LIST: &str = "/leads/list";
    pub const SUMMARY: &str = "/leads/summary";
    pub const DOWNLOAD: &str = "/leads/download";
    pub const CREATE: &str = "/leads/create";
    pub const UPDATE: &str = "/leads/update";
    pub const DELETE: &str = "/leads/delete";
    pub const BULK_DELETE: &str = "/leads/bulk-delete";

    pub fn list(params: &LeadsListParams) -> String {
        let query = QueryParams::new()
            .with("user_id", &params.user_id)
            .with("page", params.page)
            .with("limit", params.limit)
            .with("search", params.search.clone())
            .with("type", lead_type(params.lead_type))
            .with("folder_id", params.folder_id.clone())
            .with("is_converted", params.is_converted);
        with_query(LIST, &query)
    }

    pub fn summary(params: &LeadsSummaryParams) -> String {
        let query = QueryParams::new()
            .with("user_id", &params.user_id)
            .with("days", params.days)
            .with("type", lead_type(params.lead_type))
            .with("folder_id", params.folder_id.clone())
            .with("dateFrom", params.date_from.clone())
            .with("dateTo", params.date_to.clone());
        with_query(SUMMARY, &query)
    }

    pub fn download(params: &DownloadLeadsParams) -> String {
        let query = QueryParams::new()
            .with("user_id", &params.user_id)
            .with("search", params.search.clone())
            .with("type", lead_type(params.lead_type))
            .with("folder_id", params.folder_id.clone())
            .with("is_converted", params.is_converted);
        with_query(DOWNLOAD, &query)
    }
}

pub mod notifications {
    use super::*;

    pub const BASE: &str = "/notification";
    pub const ADMIN: &str = "/notification/admin";
    pub const CREATE: &str = "/notification/create";
    pub const BULK_CREATE: &str = "/notification/bulk-create";
    pub const MARK_ALL_READ: &str = "/notification/read-all";
    pub const DELETE_ALL: &str = "/notification/delete-all";
    pub const BULK_DELETE: &str = "/notification/bulk-delete";

    /// The caller's own notifications
    pub fn get(page: PageQuery) -> String {
        with_pagination(BASE, page, QueryParams::new())
    }

    /// Every user's notifications (admin)
    pub fn get_all_admin(page: PageQuery) -> String {
        with_pagination(ADMIN, page, QueryParams::new())
    }

    pub fn mark_one_read(id: &str) -> String {
        format!("{BASE}/{id}/read")
    }

    pub fn delete_one(id: &str) -> String {
        format!("{BASE}/{id}")
    }
}

pub mod dashboard {
    pub const GET: &str = "/dashboard";
}

pub mod user {
    pub const UPDATE: &str = "/user/update";
}

pub mod support {
    pub const BUG_CREATE: &str = "/bug/create";
    pub const FEEDBACK_CREATE: &str = "/feedback/create";
}

pub mod admin {
    use super::*;

    pub const BUGS: &str = "/bug/get";
    pub const FEEDBACK: &str = "/feedback/get";

    pub fn bugs(filters: &BugFilters) -> String {
        with_pagination(
            BUGS,
            PageQuery::page(filters.page, filters.limit),
            QueryParams::new()
                .with("search", filters.search.clone())
                .with("priority", filters.priority.clone())
                .with("status", filters.status.clone())
                .with("category", filters.category.clone()),
        )
    }

    pub fn feedback(filters: &FeedbackFilters) -> String {
        with_pagination(
            FEEDBACK,
            PageQuery::page(filters.page, filters.limit),
            QueryParams::new()
                .with("search", filters.search.clone())
                .with("type", filters.feedback_type.clone())
                .with("status", filters.status.clone())
                .with("rating", filters.rating),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_keeps_order_and_nothing_else() {
        assert_eq!(
            notifications::get(PageQuery::offset(0, 10)),
            "/notification?offset=0&limit=10"
        );
    }

    #[test]
    fn empty_pagination_has_no_query_string() {
        assert_eq!(notifications::get(PageQuery::default()), "/notification");
        assert_eq!(with_pagination("/x", PageQuery::default(), QueryParams::new()), "/x");
    }

    #[test]
    fn page_style_pagination() {
        assert_eq!(
            with_pagination("/bug/get", PageQuery::page(2, 25), QueryParams::new()),
            "/bug/get?limit=25&page=2"
        );
    }

    #[test]
    fn identifiers_are_embedded_verbatim() {
        let id = "65f1c0ffee0123456789abcd";
        assert_eq!(
            notifications::mark_one_read(id),
            "/notification/65f1c0ffee0123456789abcd/read"
        );
        assert_eq!(notifications::delete_one(id), "/notification/65f1c0ffee0123456789abcd");
    }

    #[test]
    fn lead_list_skips_unset_and_empty_filters() {
        let params = LeadsListParams {
            user_id: "u1".into(),
            page: Some(1),
            limit: Some(20),
            search: Some(String::new()),
            lead_type: Some(LeadType::Linkedin),
            folder_id: None,
            is_converted: Some(false),
        };
        assert_eq!(
            leads::list(&params),
            "/leads/list?user_id=u1&page=1&limit=20&type=LINKEDIN&is_converted=false"
        );
    }

    #[test]
    fn lead_summary_encodes_dates() {
        let params = LeadsSummaryParams {
            user_id: "u1".into(),
            date_from: Some("2025-01-01T00:00:00+00:00".into()),
            ..Default::default()
        };
        assert_eq!(
            leads::summary(&params),
            "/leads/summary?user_id=u1&dateFrom=2025-01-01T00%3A00%3A00%2B00%3A00"
        );
    }

    #[test]
    fn download_encodes_search() {
        let params = DownloadLeadsParams {
            user_id: "u1".into(),
            search: Some("ada lovelace".into()),
            ..Default::default()
        };
        assert_eq!(leads::download(&params), "/leads/download?user_id=u1&search=ada%20lovelace");
    }

    #[test]
    fn admin_listings() {
        let users =
            UserFilters { page: 1, limit: 10, search: Some("ada".into()), ..Default::default() };
        assert_eq!(auth::users(&users), "/auth/get-user?limit=10&page=1&search=ada");

        let feedback = FeedbackFilters { page: 1, limit: 5, rating: Some(4), ..Default::default() };
        assert_eq!(admin::feedback(&feedback), "/feedback/get?limit=5&page=1&rating=4");
    }

    #[test]
    fn catalog_is_deterministic() {
        let params = LeadsListParams { user_id: "u1".into(), ..Default::default() };
        assert_eq!(leads::list(&params), leads::list(&params));
        assert_eq!(leads::list(&params), "/leads/list?user_id=u1");
    }
}
