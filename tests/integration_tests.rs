// Integration tests entry point

mod fixtures;

mod integration {
    mod test_generate;
    mod test_plan_move;
    mod test_update_expectations;
}

mod contract {
    mod test_benchmark_csv;
    mod test_waterfall_json;
}

mod unit {
    mod cli_args_tests;
    mod rewrite_tests;
}
