mod row_major;
