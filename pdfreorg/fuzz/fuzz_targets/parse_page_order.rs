#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfreorg::config::PageOrder;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing never panics; anything it accepts survives a Display round trip.
    if let Ok(order) = PageOrder::parse(s) {
        let reparsed = PageOrder::parse(&order.to_string()).unwrap();
        assert_eq!(reparsed, order);
    }
});
