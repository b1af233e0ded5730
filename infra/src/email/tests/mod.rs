mod smtp_tests;
