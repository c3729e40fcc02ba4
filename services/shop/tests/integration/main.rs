mod cascade_test;
mod order_test;
mod placement_test;
