//! Previous-visit resolution.
//!
//! Two cookies remember when a visitor was last here: a long-lived `visit`
//! cookie holding the baseline, and a short-lived `visit-cache` cookie that
//! pins that baseline for a burst of requests. Without the cache cookie every
//! request would move the baseline to "now" and nothing would ever look new.
//!
//! A [`VisitTracker`] is extracted per request, resolves the previous visit at
//! most once, and hands its cookie jar back to the response.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use crate::config::{NoveltySettings, VisitCookieValue};
use crate::domain::stamp::Stamp;

pub struct VisitTracker {
    settings: Arc<NoveltySettings>,
    jar: CookieJar,
    now: OffsetDateTime,
    prev_visit: Option<i64>,
}

impl VisitTracker {
    pub fn new(settings: Arc<NoveltySettings>, jar: CookieJar, now: OffsetDateTime) -> Self {
        Self { settings, jar, now, prev_visit: None }
    }

    pub fn settings(&self) -> &NoveltySettings {
        &self.settings
    }

    pub fn request_time(&self) -> OffsetDateTime {
        self.now
    }

    /// The previous visit in the configured comparison format.
    pub fn previous_visit(&mut self) -> Stamp {
        let unix = self.previous_visit_unix();
        self.settings.timestamp_format.stamp(unix)
    }

    /// The previous visit as epoch seconds. Cookies are consulted (and
    /// possibly written) on the first call only.
    pub fn previous_visit_unix(&mut self) -> i64 {
        if let Some(prev) = self.prev_visit {
            return prev;
        }
        let prev = self.resolve();
        self.prev_visit = Some(prev);
        prev
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    fn resolve(&mut self) -> i64 {
        if let Some(cached) = self.read_seconds(&self.settings.cache_cookie) {
            debug!(prev_visit = cached, "previous visit from cache cookie");
            return cached;
        }

        let now = self.now.unix_timestamp();
        let prev = self.read_seconds(&self.settings.visit_cookie).unwrap_or(now);
        let visit_value = match self.settings.visit_value {
            VisitCookieValue::Previous => prev,
            VisitCookieValue::RequestTime => now,
        };

        let visit = stamp_cookie(
            &self.settings.visit_cookie,
            visit_value,
            self.now + Duration::seconds(i64::from(self.settings.visit_stamina)),
        );
        let cache = stamp_cookie(
            &self.settings.cache_cookie,
            prev,
            self.now + Duration::seconds(i64::from(self.settings.cache_stamina)),
        );
        self.jar = self.jar.clone().add(visit).add(cache);

        debug!(prev_visit = prev, first_visit = prev == now, "visit cookies issued");
        prev
    }

    fn read_seconds(&self, name: &str) -> Option<i64> {
        let cookie = self.jar.get(name)?;
        match cookie.value().trim().parse::<i64>() {
            Ok(secs) => Some(secs),
            Err(_) => {
                warn!(cookie = name, value = cookie.value(), "ignoring malformed visit cookie");
                None
            }
        }
    }
}

fn stamp_cookie(name: &str, secs: i64, expires: OffsetDateTime) -> Cookie<'static> {
    Cookie::build((name.to_owned(), secs.to_string()))
        .path("/").http_only(true).same_site(SameSite::Lax)
        .expires(expires).build()
}

#[async_trait]
impl<S> FromRequestParts<S> for VisitTracker
where
    S: Send + Sync,
    Arc<NoveltySettings>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let settings = Arc::<NoveltySettings>::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self::new(settings, jar, OffsetDateTime::now_utc()))
    }
}

impl IntoResponseParts for VisitTracker {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stamp::{TimestampFormat, CALENDAR_LAYOUT};
    use axum::http::{header, HeaderMap, HeaderValue};
    use axum::response::IntoResponse;

    const NOW: i64 = 1_700_000_000;

    fn now() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(NOW).unwrap()
    }

    fn tracker(cookie_header: Option<&str>, settings: NoveltySettings) -> VisitTracker {
        let mut headers = HeaderMap::new();
        if let Some(raw) = cookie_header {
            headers.insert(header::COOKIE, HeaderValue::from_str(raw).unwrap());
        }
        VisitTracker::new(Arc::new(settings), CookieJar::from_headers(&headers), now())
    }

    fn set_cookies(tracker: VisitTracker) -> Vec<Cookie<'static>> {
        let response = (tracker, ()).into_response();
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| Cookie::parse(v.to_str().unwrap().to_owned()).unwrap())
            .collect()
    }

    fn find<'a>(cookies: &'a [Cookie<'static>], name: &str) -> &'a Cookie<'static> {
        cookies.iter().find(|c| c.name() == name).unwrap()
    }

    #[test]
    fn first_visit_uses_request_time_and_sets_both_cookies() {
        let mut t = tracker(None, NoveltySettings::default());
        assert_eq!(t.previous_visit(), Stamp::Unix(NOW));

        let cookies = set_cookies(t);
        assert_eq!(cookies.len(), 2);

        let visit = find(&cookies, "visit");
        assert_eq!(visit.value(), NOW.to_string());
        assert_eq!(visit.expires_datetime(), Some(now() + Duration::seconds(31_536_000)));
        assert_eq!(visit.path(), Some("/"));

        let cache = find(&cookies, "visit-cache");
        assert_eq!(cache.value(), NOW.to_string());
        assert_eq!(cache.expires_datetime(), Some(now() + Duration::seconds(1_800)));
    }

    #[test]
    fn cache_cookie_wins_and_nothing_is_written() {
        let mut t = tracker(
            Some("visit=1600000000; visit-cache=1650000000"),
            NoveltySettings::default(),
        );
        assert_eq!(t.previous_visit(), Stamp::Unix(1_650_000_000));
        assert!(set_cookies(t).is_empty());
    }

    #[test]
    fn visit_cookie_is_used_and_mirrored_on_cache_miss() {
        let mut t = tracker(Some("visit=1600000000"), NoveltySettings::default());
        assert_eq!(t.previous_visit_unix(), 1_600_000_000);

        let cookies = set_cookies(t);
        assert_eq!(find(&cookies, "visit").value(), "1600000000");
        assert_eq!(find(&cookies, "visit-cache").value(), "1600000000");
    }

    #[test]
    fn repeated_calls_return_the_same_instant() {
        let mut t = tracker(Some("visit=1600000000"), NoveltySettings::default());
        let first = t.previous_visit();
        let second = t.previous_visit();
        assert_eq!(first, second);
        assert_eq!(set_cookies(t).len(), 2);
    }

    #[test]
    fn untouched_tracker_writes_nothing() {
        let t = tracker(Some("visit=1600000000"), NoveltySettings::default());
        assert!(set_cookies(t).is_empty());
    }

    #[test]
    fn malformed_cache_cookie_counts_as_miss() {
        let mut t = tracker(
            Some("visit=1600000000; visit-cache=yesterday"),
            NoveltySettings::default(),
        );
        assert_eq!(t.previous_visit_unix(), 1_600_000_000);
        let cookies = set_cookies(t);
        assert_eq!(find(&cookies, "visit-cache").value(), "1600000000");
    }

    #[test]
    fn request_time_mode_advances_the_baseline() {
        let settings = NoveltySettings {
            visit_value: VisitCookieValue::RequestTime,
            ..NoveltySettings::default()
        };
        let mut t = tracker(Some("visit=1600000000"), settings);
        assert_eq!(t.previous_visit_unix(), 1_600_000_000);

        let cookies = set_cookies(t);
        assert_eq!(find(&cookies, "visit").value(), NOW.to_string());
        assert_eq!(find(&cookies, "visit-cache").value(), "1600000000");
    }

    #[test]
    fn custom_names_and_calendar_format() {
        let settings = NoveltySettings {
            visit_cookie: "seen".to_owned(),
            cache_cookie: "seen-cache".to_owned(),
            cache_stamina: 60,
            timestamp_format: TimestampFormat::calendar(CALENDAR_LAYOUT).unwrap(),
            ..NoveltySettings::default()
        };
        let mut t = tracker(Some("visit=1; seen=1700000000"), settings);
        assert_eq!(t.previous_visit(), Stamp::Calendar("2023-11-14 22:13:20".to_owned()));

        let cookies = set_cookies(t);
        assert_eq!(find(&cookies, "seen").value(), "1700000000");
        let cache = find(&cookies, "seen-cache");
        assert_eq!(cache.expires_datetime(), Some(now() + Duration::seconds(60)));
    }
}
