//! API - Typed Calls over the Transport
//!
//! Every call is handed to the transport before the function returns; the
//! returned future only waits for the response and decodes it.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::domain::backfill::BackfillStatus;
use crate::domain::command::Request;
use crate::domain::history::{ConsumptionHistory, RawHistory};
use crate::domain::meter::{DashboardSummary, EntityRef, VersionResponse};
use crate::domain::schedule::EvSchedule;
use crate::error::{DecodeSnafu, Result};
use crate::services::transport::Transport;

/// Pending typed response
pub type ApiFuture<T> = LocalBoxFuture<'static, Result<T>>;

/// Issue `request` now and decode the response into `T` when it arrives
pub fn call_typed<T: DeserializeOwned + 'static>(transport: &dyn Transport, request: Request) -> ApiFuture<T> {
    let command = request.command();
    tracing::debug!(command, "Calling host");

    let response = transport.call(request);
    async move {
        let value = response.await?;
        serde_json::from_value(value).context(DecodeSnafu { command })
    }
    .boxed_local()
}

/// Backend integration version
pub fn get_version(transport: &dyn Transport) -> ApiFuture<VersionResponse> {
    call_typed(transport, Request::Version)
}

/// Meters and EV chargers with their latest figures
pub fn get_dashboard_summary(transport: &dyn Transport) -> ApiFuture<DashboardSummary> {
    call_typed(transport, Request::DashboardSummary)
}

/// Daily consumption for `serial` over the most recent `days` days
pub fn get_consumption_history(
    transport: &dyn Transport,
    serial: &EntityRef,
    days: u32,
) -> ApiFuture<ConsumptionHistory> {
    let request = Request::ConsumptionHistory {
        serial: serial.clone(),
        days,
    };
    call_typed::<RawHistory>(transport, request)
        .map(|raw| raw.map(ConsumptionHistory::from))
        .boxed_local()
}

/// Charging slots for one EV charger
pub fn get_ev_schedule(transport: &dyn Transport, device_id: &EntityRef) -> ApiFuture<EvSchedule> {
    call_typed(
        transport,
        Request::EvSchedule {
            device_id: device_id.clone(),
        },
    )
}

/// Historical statistics import progress
pub fn get_backfill_status(transport: &dyn Transport) -> ApiFuture<BackfillStatus> {
    call_typed(transport, Request::BackfillStatus)
}
