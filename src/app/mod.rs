mod export;
mod scan;
mod single;


pub(crate) use scan::run_scan;
pub(crate) use single::run_single;
