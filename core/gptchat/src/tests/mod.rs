mod interactive_tests;
