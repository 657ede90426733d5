mod read_good;
