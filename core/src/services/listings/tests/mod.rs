mod fixtures;
mod property_tests;
mod project_tests;
