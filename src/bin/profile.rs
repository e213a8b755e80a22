use mazepath::app;

fn main() -> std::io::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);
    let size = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(16);
    app::profile(size, size, 0, num_iters)
}
