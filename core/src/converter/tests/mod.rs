mod enum_converter_tests;
