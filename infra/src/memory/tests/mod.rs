mod user_repository_tests;
