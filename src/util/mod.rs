const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub(crate) fn log_info(scope: &str, msg: &str) {
    web_sys::console::log_1(&format!("[{scope}] {msg}").into());
}

pub(crate) fn log_error(scope: &str, msg: &str) {
    web_sys::console::error_1(&format!("[{scope}] {msg}").into());
}

/// "Mon, Jan 5" style label.
pub(crate) fn day_label(weekday: u32, month: u32, day: u32) -> String {
    let w = WEEKDAYS.get(weekday as usize).copied().unwrap_or("?");
    let m = MONTHS.get(month as usize).copied().unwrap_or("?");
    format!("{w}, {m} {day}")
}

/// Labels for today and the following `count - 1` days, local time.
pub(crate) fn upcoming_days(count: u32) -> Vec<String> {
    (0..count)
        .map(|offset| {
            let d = js_sys::Date::new_0();
            d.set_date(d.get_date() + offset);
            day_label(d.get_day(), d.get_month(), d.get_date())
        })
        .collect()
}

/// Drives a future that never waits, such as one built from
/// `std::future::ready` stand-ins for API calls.
#[cfg(test)]
pub(crate) fn block_on_ready<F: std::future::Future>(fut: F) -> F::Output {
    use std::task::{Context, Poll, Waker};

    let mut fut = std::pin::pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    match fut.as_mut().poll(&mut cx) {
        Poll::Ready(v) => v,
        Poll::Pending => panic!("future was not ready"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(1, 0, 5), "Mon, Jan 5");
        assert_eq!(day_label(6, 11, 31), "Sat, Dec 31");
    }

    #[test]
    fn test_day_label_out_of_range() {
        assert_eq!(day_label(9, 12, 1), "?, ? 1");
    }
}
