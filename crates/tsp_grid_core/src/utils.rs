use crate::point::Point;

/// Edges longer than this multiple of the average edge count as spikes.
const SPIKE_FACTOR: f64 = 10.0;

/// Open-tour metrics over a visited sequence: total length, longest edge,
/// spike count. Logged at info level; also returned for callers that want
/// the numbers.
pub fn tour_distance(route: &[Point]) -> (f64, f64, usize) {
    if route.len() < 2 {
        log::info!(
            "metrics: n={} total=0 longest=0 avg=0 spike_threshold=0 spikes=0",
            route.len()
        );
        return (0.0, 0.0, 0);
    }

    let mut total = 0.0;
    let mut longest = 0.0f64;
    // OPEN: only edges i -> i+1
    for pair in route.windows(2) {
        let d = pair[0].dist(&pair[1]);
        total += d;
        if d > longest {
            longest = d;
        }
    }

    let avg_edge = total / ((route.len() - 1) as f64);
    let threshold = avg_edge * SPIKE_FACTOR;
    let spikes = route
        .windows(2)
        .filter(|pair| pair[0].dist(&pair[1]) > threshold)
        .count();

    log::info!(
        "metrics: n={} total={total:.2} longest={longest:.2} avg={avg_edge:.2} spike_threshold={threshold:.2} spikes={spikes}",
        route.len()
    );

    (total, longest, spikes)
}
