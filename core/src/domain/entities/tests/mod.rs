mod inquiry_tests;
mod property_tests;
mod user_tests;
mod verification_request_tests;
