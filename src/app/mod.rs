pub mod ports;
pub mod fetch;
pub mod region_catalog;
pub mod geo_locator;
pub mod category_filter;
pub mod point_query;
pub mod point_detail;
pub mod navigation;
