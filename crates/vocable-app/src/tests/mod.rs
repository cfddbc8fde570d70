mod review_flow_tests;
