//! Meeting actions: open the resolved meeting in the conferencing client.

use nextcall_core::NormalizedMeeting;
use tracing::info;

use crate::error::{ClientError, ClientResult};

/// Opens the meeting's client URI with the system handler.
pub fn open_meeting(meeting: &NormalizedMeeting) -> ClientResult<()> {
    let link = meeting.link.as_deref().ok_or_else(|| {
        ClientError::Action(format!("meeting '{}' has no meeting URL", meeting.title))
    })?;

    info!(event = %meeting.id, url = %link, "opening meeting");
    open::that(link).map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))?;

    Ok(())
}
